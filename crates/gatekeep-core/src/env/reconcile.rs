//! Merging a stored snapshot with live environment overrides.

use tracing::debug;

use super::keys;
use super::snapshot::EnvSnapshot;
use super::source::EnvSource;

/// Apply environment overrides to a snapshot loaded from durable storage.
///
/// Only keys already present in `candidate` are considered. A non-blank env
/// value that differs from the stored one wins. The encryption key is never
/// taken from the environment. Returns whether anything changed, in which
/// case the caller must persist the candidate.
pub fn reconcile(candidate: &mut EnvSnapshot, source: &dyn EnvSource) -> bool {
    let mut dirty = false;

    for (key, stored) in candidate.string_env.iter_mut() {
        if key == keys::ENCRYPTION_KEY {
            continue;
        }
        if let Some(value) = source.string(key)
            && value != *stored
        {
            debug!(key = %key, "String env overridden from process environment");
            *stored = value;
            dirty = true;
        }
    }

    for (key, stored) in candidate.bool_env.iter_mut() {
        if let Some(value) = source.boolean(key)
            && value != *stored
        {
            debug!(key = %key, value, "Bool env overridden from process environment");
            *stored = value;
            dirty = true;
        }
    }

    for (key, stored) in candidate.slice_env.iter_mut() {
        if let Some(value) = source.list(key)
            && value != *stored
        {
            debug!(key = %key, "List env overridden from process environment");
            *stored = value;
            dirty = true;
        }
    }

    if smtp_unconfigured(candidate) {
        for flag in [keys::DISABLE_EMAIL_VERIFICATION, keys::DISABLE_MAGIC_LINK_LOGIN] {
            if !candidate.flag(flag) {
                candidate.set_flag(flag, true);
                dirty = true;
            }
        }
    }

    dirty
}

/// Whether the SMTP settings are too incomplete to send mail.
///
/// Evaluated as `host == "" || user == "" || pass == "" || (sender == "" &&
/// port == "")`. Email verification and magic links are forced off when
/// this holds.
pub fn smtp_unconfigured(snapshot: &EnvSnapshot) -> bool {
    snapshot.string(keys::SMTP_HOST).is_empty()
        || snapshot.string(keys::SMTP_USERNAME).is_empty()
        || snapshot.string(keys::SMTP_PASSWORD).is_empty()
        || (snapshot.string(keys::SENDER_EMAIL).is_empty()
            && snapshot.string(keys::SMTP_PORT).is_empty())
}
