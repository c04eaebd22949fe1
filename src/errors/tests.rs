//! Unit tests for error handling.

use std::rc::Rc;

use crate::errors::diagnostics::Diagnostics;
use crate::errors::errors::{Error, ErrorImpl, ErrorKind, ErrorTip};
use crate::Position;

fn position(offset: u32) -> Position {
    Position(offset, Rc::new("test.mu".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(ErrorImpl::UnrecognisedToken { token: "@".to_string() }, position(10));

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 10);
    assert_eq!(error.kind(), ErrorKind::Syntax);
}

#[test]
fn test_error_kinds() {
    let semantic = Error::new(
        ErrorImpl::NameConflict {
            kind: "global variable".to_string(),
            name: "a".to_string(),
            location: "in this module".to_string(),
        },
        position(0),
    );
    let internal = Error::new(ErrorImpl::Internal { message: "scope".to_string() }, position(0));

    assert_eq!(semantic.kind(), ErrorKind::Semantic);
    assert!(internal.is_internal());
}

#[test]
fn test_error_message() {
    let error = Error::new(
        ErrorImpl::TypeMatchError {
            expected: "int".to_string(),
            received: "string".to_string(),
        },
        position(0),
    );

    assert_eq!(error.get_message(), "types do not match: expected int, received string");
}

#[test]
fn test_error_tips_include_attached_hints() {
    let error = Error::new(ErrorImpl::UninitializedConstant { variable: "x".to_string() }, position(3))
        .with_hint("Constants are evaluated once");

    let tips = error.get_tips();
    assert_eq!(tips.len(), 2);
    assert_eq!(tips[1], ErrorTip::Suggestion("Constants are evaluated once".to_string()));
}

#[test]
fn test_error_without_tips() {
    let error = Error::new(ErrorImpl::ModuleNotFound { module: "std".to_string() }, position(0));

    assert!(error.get_tips().is_empty());
}

#[test]
fn test_diagnostics_limit() {
    let mut diagnostics = Diagnostics::new(Some(1));
    diagnostics.report(Error::new(ErrorImpl::UnexpectedToken { token: ";".to_string() }, position(0)));
    diagnostics.report(Error::new(ErrorImpl::UnexpectedToken { token: ")".to_string() }, position(1)));

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.is_exhausted());
}
