// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::infrastructure::constants::{MAX_NAME_LENGTH, NAME_SUFFIX_LENGTH};
use crate::shared::error::EdgeError;
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NameError {
    #[error("the provided name is empty")]
    Empty,

    #[error("the name doesn't contain a legal alphanumeric character")]
    NoLegalCharacter,
}

impl From<NameError> for EdgeError {
    fn from(err: NameError) -> Self {
        EdgeError::Validation(err.to_string())
    }
}

static ILLEGAL_CHARS: OnceLock<Regex> = OnceLock::new();

fn illegal_chars() -> &'static Regex {
    ILLEGAL_CHARS.get_or_init(|| Regex::new("[^a-z0-9-]+").expect("valid pattern"))
}

/// Whether a string is usable as a resource name as-is: non-empty, at most
/// 253 characters, lowercase alphanumerics and hyphens, alphanumeric at
/// both ends.
pub fn is_valid_name(name: &str) -> bool {
    let legal_end = |c: Option<char>| matches!(c, Some('a'..='z') | Some('0'..='9'));

    !name.is_empty()
        && name.len() <= MAX_NAME_LENGTH
        && name
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'-'))
        && legal_end(name.chars().next())
        && legal_end(name.chars().last())
}

/// Best-effort conversion of an arbitrary string into a valid resource
/// name. Valid input is returned unchanged. Distinct inputs may collapse to
/// the same output; callers needing uniqueness append [`random_suffix`] or
/// rely on server-side name enforcement.
pub fn normalize(raw: &str) -> Result<String, NameError> {
    if raw.is_empty() {
        return Err(NameError::Empty);
    }
    if is_valid_name(raw) {
        return Ok(raw.to_string());
    }

    let lowered = raw.to_lowercase().replace('.', "-");

    let is_legal = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
    let (first, last) = match (lowered.find(is_legal), lowered.rfind(is_legal)) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(NameError::NoLegalCharacter),
    };

    let mut name = illegal_chars()
        .replace_all(&lowered[first..=last], "")
        .into_owned();
    name.truncate(MAX_NAME_LENGTH);
    Ok(name)
}

/// Last path segment of an image reference, the part a derived workload
/// name is built from.
pub fn image_name_component(image: &str) -> &str {
    image.rsplit('/').next().unwrap_or(image)
}

/// Random 8-character lowercase alphabetic token for disambiguating derived
/// workload names. Not cryptographically secure; uniqueness is ultimately
/// enforced server-side.
pub fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..NAME_SUFFIX_LENGTH)
        .map(|_| rng.gen_range(b'a'..=b'z') as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_normalize_is_identity_for_valid_names() {
        for name in ["nginx", "nginx-21-6", "a", "dev1", "a-b-c-0"] {
            assert_eq!(normalize(name).unwrap(), name);
        }
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize(""), Err(NameError::Empty));
    }

    #[test]
    fn test_normalize_no_legal_character() {
        for raw in ["---", "!!!", ":/@", "_.-"] {
            assert_eq!(normalize(raw), Err(NameError::NoLegalCharacter));
        }
    }

    #[test]
    fn test_normalize_produces_valid_names() {
        for raw in [
            "Nginx",
            "nginx:1.21.6",
            "UPPER.case",
            "--leading-and-trailing--",
            "we~ird@chars#here",
            "registry.example.com",
        ] {
            let name = normalize(raw).unwrap();
            assert!(
                is_valid_name(&name),
                "normalize({:?}) produced invalid name {:?}",
                raw,
                name
            );
            assert!(name.len() <= 253);
        }
    }

    #[test]
    fn test_normalize_image_tag() {
        let component = image_name_component("quay.io/project-flotta/nginx:1.21.6");
        assert_eq!(component, "nginx:1.21.6");

        let name = normalize(component).unwrap();
        assert!(is_valid_name(&name));
        assert!(name.starts_with("nginx"));
    }

    #[test]
    fn test_normalize_truncates_long_input() {
        let raw = "A".repeat(600);
        let name = normalize(&raw).unwrap();
        assert_eq!(name.len(), 253);
        assert!(is_valid_name(&name));
    }

    #[test]
    fn test_image_name_component_without_registry() {
        assert_eq!(image_name_component("nginx:latest"), "nginx:latest");
    }

    #[test]
    fn test_random_suffix_shape() {
        for _ in 0..100 {
            let suffix = random_suffix();
            assert_eq!(suffix.len(), 8);
            assert!(suffix.chars().all(|c| c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_random_suffix_is_mostly_distinct() {
        let suffixes: HashSet<String> = (0..10_000).map(|_| random_suffix()).collect();
        // collisions are allowed but should be vanishingly rare
        assert!(suffixes.len() >= 9_990);
    }
}
