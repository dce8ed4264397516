// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Source-like rendering of the AST for debug dumps.
//!
//! Binary and unary expressions are fully parenthesized so the printed
//! tree shows exactly how precedence was resolved.

use std::fmt;

use super::{CodeBlock, Function, Node, Root, Type, Variable};

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{statement};")?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Symbol(sym) => f.write_str(&sym.name),
            Node::Boolean(b) => write!(f, "{}", b.value),
            Node::Number(n) => write!(f, "{}", n.value),
            Node::String(s) => write!(f, "\"{}\"", s.value),
            Node::Unary(un) => write!(f, "({}{})", un.operator.symbol(), un.operand),
            Node::Binary(bin) => {
                write!(f, "({} {} {})", bin.left, bin.operator.symbol(), bin.right)
            }
            Node::Variable(var) => write!(f, "{var}"),
            Node::CodeBlock(block) => write!(f, "{block}"),
            Node::Function(func) => write!(f, "{func}"),
            Node::Invalid => f.write_str("<invalid>"),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.declared_type, self.name)?;
        if let Some(init) = &self.initializer {
            write!(f, " = {init}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CodeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{ ")?;
        for statement in &self.statements {
            write!(f, "{statement}; ")?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "def {}(", self.name)?;
        for (i, param) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ") -> {} {}", self.return_type, self.body)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOperator, UnaryOperator};

    #[test]
    fn test_expression_display() {
        let node = Node::binary(
            BinaryOperator::Add,
            Node::number(1.0),
            Node::binary(BinaryOperator::Multiply, Node::number(2.5), Node::symbol("x")),
        );
        assert_eq!(node.to_string(), "(1 + (2.5 * x))");

        let node = Node::unary(UnaryOperator::Not, Node::boolean(true));
        assert_eq!(node.to_string(), "(!true)");
    }

    #[test]
    fn test_function_display() {
        let func = Node::Function(Function {
            return_type: Type::Int,
            name: "main".into(),
            parameters: vec![],
            body: Box::new(Node::CodeBlock(CodeBlock {
                statements: vec![Node::string("hi"), Node::number(0.0)],
            })),
        });
        assert_eq!(func.to_string(), "def main() -> int { \"hi\"; 0; }");
    }

    #[test]
    fn test_root_display() {
        let root = Root {
            statements: vec![
                Node::Variable(Variable {
                    declared_type: Type::Str,
                    name: "s".into(),
                    initializer: Some(Box::new(Node::string("a"))),
                }),
                Node::Invalid,
            ],
            lines: vec![1, 2],
        };
        assert_eq!(root.to_string(), "str s = \"a\";\n<invalid>;\n");
    }
}
