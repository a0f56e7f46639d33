// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStyle {
    Success,
    Failure,
}

/// One-line notification raised by a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub style: ToastStyle,
    pub title: String,
}

impl Toast {
    pub fn success(title: impl Into<String>) -> Self {
        Toast {
            style: ToastStyle::Success,
            title: title.into(),
        }
    }

    pub fn failure(title: impl Into<String>) -> Self {
        Toast {
            style: ToastStyle::Failure,
            title: title.into(),
        }
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = match self.style {
            ToastStyle::Success => "✅",
            ToastStyle::Failure => "❌",
        };
        write!(f, "{} {}", mark, self.title)
    }
}

/// Print and drop queued toasts; failures go to stderr.
pub fn flush(toasts: &mut Vec<Toast>) {
    for t in toasts.drain(..) {
        match t.style {
            ToastStyle::Success => println!("{}", t),
            ToastStyle::Failure => eprintln!("{}", t),
        }
    }
}
