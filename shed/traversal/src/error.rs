/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::fmt;

use thiserror::Error;

/// Part of a [`Description`](crate::Description) that has to be present
/// before it can be walked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Missing {
    /// No start node, see [`Description::traverse`](crate::Description::traverse).
    StartNode,
    /// No relation, see [`Description::follow`](crate::Description::follow).
    Relations,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::StartNode => {
                write!(f, "description should contain start node, use `traverse`")
            }
            Missing::Relations => {
                write!(f, "description should contain relation(s), use `follow`")
            }
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraversalError {
    #[error("Incomplete traversal description: {0}")]
    IncompleteDescription(Missing),
    #[error("Unsupported argument type for `{call}`: {kind} can not be used here")]
    UnsupportedArgument {
        call: &'static str,
        kind: &'static str,
    },
    #[error("Arguments or block expected for `{call}`")]
    ArgumentsExpected { call: &'static str },
}

pub type Result<T, E = TraversalError> = std::result::Result<T, E>;

macro_rules! unsupported_argument {
    ( $call:expr, $arg:expr ) => {
        $crate::error::TraversalError::UnsupportedArgument {
            call: $call,
            kind: $arg.kind(),
        }
    };
}
