// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! Diagnostic printing in `file:line:col: Kind: message` form.

use notc_compiler::Error;
use owo_colors::OwoColorize;

/// Format a diagnostic without color.
pub fn render(file: &str, error: &Error) -> String {
    let label = error.kind().label();
    match error.position() {
        Some((line, column)) => format!("{file}:{line}:{column}: {label}: {}", error.message()),
        None => format!("{file}: {label}: {}", error.message()),
    }
}

/// Print a diagnostic to stderr with the location and kind highlighted.
pub fn report(file: &str, error: &Error) {
    let location = match error.position() {
        Some((line, column)) => format!("{file}:{line}:{column}:"),
        None => format!("{file}:"),
    };
    eprintln!(
        "{} {} {}",
        location.bold(),
        format!("{}:", error.kind().label()).red().bold(),
        error.message()
    );
}

/// Print every diagnostic followed by a count.
pub fn report_all(file: &str, errors: &[Error]) {
    for error in errors {
        report(file, error);
    }
    if !errors.is_empty() {
        let noun = if errors.len() == 1 { "error" } else { "errors" };
        eprintln!("{}", format!("{} {noun} reported", errors.len()).dimmed());
    }
}
