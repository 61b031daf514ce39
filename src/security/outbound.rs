// ABOUTME: Allow-list sanitizer for values sent to third-party services
// ABOUTME: Reduces free text to alphanumerics and single spaces before it leaves the service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Outbound value sanitization
//!
//! Anything derived from user input or from another collaborator (a detected
//! label, for example) passes through [`OutboundSanitizer`] before being
//! embedded in a request to a third party. The transform is an allow-list:
//! alphanumeric characters are kept, whitespace runs collapse to one space,
//! everything else is dropped.

/// Longest token forwarded to a third party, in characters
pub const MAX_OUTBOUND_CHARS: usize = 100;

/// Allow-list transform for outbound query values
#[derive(Debug, Clone, Copy)]
pub struct OutboundSanitizer {
    max_chars: usize,
}

impl Default for OutboundSanitizer {
    fn default() -> Self {
        Self {
            max_chars: MAX_OUTBOUND_CHARS,
        }
    }
}

impl OutboundSanitizer {
    /// Sanitizer with a custom length cap
    #[must_use]
    pub const fn with_max_chars(max_chars: usize) -> Self {
        Self { max_chars }
    }

    /// Reduce `raw` to alphanumerics and single spaces, trimmed and capped
    #[must_use]
    pub fn sanitize(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len().min(self.max_chars));
        let mut pending_space = false;
        let mut count = 0;

        for ch in raw.chars() {
            if ch.is_whitespace() {
                pending_space = !out.is_empty();
                continue;
            }
            if !ch.is_alphanumeric() {
                continue;
            }
            if pending_space {
                if count + 1 >= self.max_chars {
                    break;
                }
                out.push(' ');
                count += 1;
                pending_space = false;
            }
            if count >= self.max_chars {
                break;
            }
            out.push(ch);
            count += 1;
        }
        out
    }

    /// Sanitized lookup token, `None` when nothing survives the transform
    #[must_use]
    pub fn lookup_token(&self, raw: &str) -> Option<String> {
        let token = self.sanitize(raw);
        (!token.is_empty()).then_some(token)
    }
}
