use crate::{error::ReleaseError, types::Release};

/// Tag used when a repository has no releases yet.
pub const INITIAL_TAG: &str = "v0.1";

/// Computes the tag that follows the most recent release.
///
/// The last `/` segment of the previous tag is the version; its last `.`
/// component is incremented when it is a plain decimal number and left
/// alone otherwise, so `release/v1.9` becomes `release/v1.10` while
/// `v1.2.rc` stays as it is.
pub fn next_tag(last_release: Option<&Release>) -> Result<String, ReleaseError> {
    let Some(release) = last_release else {
        return Ok(INITIAL_TAG.to_string());
    };
    increment_tag(&release.tag_name)
}

pub fn increment_tag(last_tag: &str) -> Result<String, ReleaseError> {
    let mut parts: Vec<String> = last_tag.split('/').map(str::to_string).collect();
    let version = match parts.last_mut() {
        Some(version) if !version.is_empty() => version,
        _ => return Err(ReleaseError::InvalidTag(last_tag.to_string())),
    };

    let mut components: Vec<String> = version.split('.').map(str::to_string).collect();
    if let Some(target) = components.last_mut() {
        *target = attempt_to_increment(target)?;
    }
    *version = components.join(".");

    Ok(parts.join("/"))
}

fn attempt_to_increment(value: &str) -> Result<String, ReleaseError> {
    if value.is_empty() {
        return Err(ReleaseError::InvalidVersion(value.to_string()));
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(value.to_string());
    }
    Ok(increment_decimal(value.trim_start_matches('0')))
}

// Adds one to a string of ASCII digits without an upper bound.
fn increment_decimal(digits: &str) -> String {
    let mut out: Vec<u8> = digits.bytes().collect();
    for digit in out.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return String::from_utf8_lossy(&out).into_owned();
        }
    }
    out.insert(0, b'1');
    String::from_utf8_lossy(&out).into_owned()
}
