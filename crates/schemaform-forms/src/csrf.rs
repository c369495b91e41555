//! CSRF (Cross-Site Request Forgery) protection
//!
//! A token is issued per session when a form is rendered and checked when the
//! form comes back. Only the most recently issued token is valid for a
//! session, so rendering the same form in two tabs invalidates the first.

use parking_lot::RwLock;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;

/// CSRF token length (64 characters)
pub const CSRF_TOKEN_LENGTH: usize = 64;

/// Allowed characters for CSRF tokens (alphanumeric)
pub const CSRF_ALLOWED_CHARS: &str =
	"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Session key the current token is stored under
pub const CSRF_SESSION_KEY: &str = "csrf_token";

/// Name of the hidden form input carrying the token
pub const CSRF_FIELD_NAME: &str = "csrf_token";

// Rejection reasons
pub const REASON_CSRF_TOKEN_MISSING: &str = "CSRF token missing.";
pub const REASON_NO_SESSION_TOKEN: &str = "No CSRF token issued for this session.";
pub const REASON_TOKEN_MISMATCH: &str = "CSRF token incorrect.";

/// Why a submitted token was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CsrfRejection {
	#[error("{}", REASON_CSRF_TOKEN_MISSING)]
	Missing,
	#[error("{}", REASON_NO_SESSION_TOKEN)]
	NoSessionToken,
	#[error("{}", REASON_TOKEN_MISMATCH)]
	Mismatch,
}

/// Per-session key/value storage
///
/// Implementations must be safe to share between request handlers.
pub trait SessionStore: Send + Sync {
	fn get(&self, session_id: &str, key: &str) -> Option<String>;

	/// Store `value`, replacing any previous value under `key`
	fn set(&self, session_id: &str, key: &str, value: String);
}

/// Process-local [`SessionStore`]
///
/// # Examples
///
/// ```
/// use schemaform_forms::{InMemorySessionStore, SessionStore};
///
/// let store = InMemorySessionStore::new();
/// store.set("session-1", "theme", "dark".to_string());
///
/// assert_eq!(store.get("session-1", "theme").as_deref(), Some("dark"));
/// assert_eq!(store.get("session-2", "theme"), None);
/// ```
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
	sessions: RwLock<HashMap<String, HashMap<String, String>>>,
}

impl InMemorySessionStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl SessionStore for InMemorySessionStore {
	fn get(&self, session_id: &str, key: &str) -> Option<String> {
		self.sessions
			.read()
			.get(session_id)
			.and_then(|values| values.get(key).cloned())
	}

	fn set(&self, session_id: &str, key: &str, value: String) {
		self.sessions
			.write()
			.entry(session_id.to_string())
			.or_default()
			.insert(key.to_string(), value);
	}
}

/// Generate a fresh random token
pub fn generate_token() -> String {
	let charset = CSRF_ALLOWED_CHARS.as_bytes();
	let mut rng = rand::thread_rng();
	(0..CSRF_TOKEN_LENGTH)
		.map(|_| charset[rng.gen_range(0..charset.len())] as char)
		.collect()
}

/// Issues and verifies per-session CSRF tokens
#[derive(Clone)]
pub struct CsrfGuard {
	store: Arc<dyn SessionStore>,
}

impl CsrfGuard {
	pub fn new(store: Arc<dyn SessionStore>) -> Self {
		Self { store }
	}

	/// Generate a token, store it in the session and return it
	///
	/// Any token previously issued to the session stops being valid.
	pub fn issue(&self, session_id: &str) -> String {
		let token = generate_token();
		self.store.set(session_id, CSRF_SESSION_KEY, token.clone());
		tracing::debug!(session = %session_id, "csrf token issued");
		token
	}

	/// Token currently stored for the session, if any
	pub fn current(&self, session_id: &str) -> Option<String> {
		self.store.get(session_id, CSRF_SESSION_KEY)
	}

	/// Compare a submitted token with the one stored for the session
	///
	/// # Examples
	///
	/// ```
	/// use std::sync::Arc;
	/// use schemaform_forms::{CsrfGuard, CsrfRejection, InMemorySessionStore};
	///
	/// let guard = CsrfGuard::new(Arc::new(InMemorySessionStore::new()));
	/// let token = guard.issue("abc");
	///
	/// assert!(guard.verify("abc", Some(&token)).is_ok());
	/// assert_eq!(guard.verify("abc", Some("forged")), Err(CsrfRejection::Mismatch));
	/// assert_eq!(guard.verify("abc", None), Err(CsrfRejection::Missing));
	/// ```
	pub fn verify(&self, session_id: &str, submitted: Option<&str>) -> Result<(), CsrfRejection> {
		let submitted = match submitted {
			Some(token) if !token.is_empty() => token,
			_ => return Err(CsrfRejection::Missing),
		};
		let expected = self
			.current(session_id)
			.filter(|token| !token.is_empty())
			.ok_or(CsrfRejection::NoSessionToken)?;

		if constant_time_eq(submitted.as_bytes(), expected.as_bytes()) {
			Ok(())
		} else {
			Err(CsrfRejection::Mismatch)
		}
	}
}

impl std::fmt::Debug for CsrfGuard {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CsrfGuard").finish_non_exhaustive()
	}
}

/// Compares SHA-256 digests of both inputs in constant time.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
	use sha2::{Digest, Sha256};
	use subtle::ConstantTimeEq;

	let hash_a = Sha256::digest(a);
	let hash_b = Sha256::digest(b);
	hash_a.ct_eq(&hash_b).into()
}
