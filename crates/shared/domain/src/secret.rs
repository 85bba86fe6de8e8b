//! Secret material supplied with a login attempt.
//!
//! A [`Secret`] keeps its bytes in a [`secrecy::SecretBox`], zeroed when the
//! secret is dropped. Plaintext is only handed out through an
//! [`ExposedSecret`] guard, a copy that is zeroed when the guard drops,
//! unwinding included.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretBox, SecretSlice};
use zeroize::{Zeroize, Zeroizing};

/// Callback invoked every time an exposed plaintext buffer is wiped.
pub type WipeHook = Arc<dyn Fn() + Send + Sync>;

/// Zero-on-drop secret buffer.
pub struct Secret {
    bytes: SecretBox<[u8]>,
    on_wipe: Option<WipeHook>,
}

impl Secret {
    /// Take ownership of `plain`.
    pub fn new(plain: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: SecretSlice::from(plain.into()),
            on_wipe: None,
        }
    }

    /// Register a callback fired after each exposed plaintext is wiped.
    pub fn with_wipe_hook(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_wipe = Some(Arc::new(hook));
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.expose_secret().len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.expose_secret().is_empty()
    }

    /// Reveal the plaintext for the lifetime of the returned guard.
    ///
    /// Keep the guard's scope as small as possible: it should not outlive the
    /// single call that needs the plaintext.
    pub fn expose(&self) -> ExposedSecret<'_> {
        ExposedSecret {
            plain: Zeroizing::new(self.bytes.expose_secret().to_vec()),
            on_wipe: self.on_wipe.as_ref(),
        }
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Secret::new(value.into_bytes())
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Secret::new(value.as_bytes())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&self.bytes).finish()
    }
}

/// Plaintext view of a [`Secret`]; wiped on drop.
pub struct ExposedSecret<'a> {
    plain: Zeroizing<Vec<u8>>,
    on_wipe: Option<&'a WipeHook>,
}

impl ExposedSecret<'_> {
    pub fn as_bytes(&self) -> &[u8] {
        &self.plain
    }

    /// Plaintext as UTF-8, for collaborators that only accept strings.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.plain).ok()
    }
}

impl Deref for ExposedSecret<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.plain
    }
}

impl Drop for ExposedSecret<'_> {
    fn drop(&mut self) {
        self.plain.zeroize();
        if let Some(hook) = self.on_wipe {
            hook();
        }
    }
}

impl fmt::Debug for ExposedSecret<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExposedSecret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_expose_returns_original_bytes() {
        let secret = Secret::from("correct horse battery staple");
        let exposed = secret.expose();

        assert_eq!(exposed.as_bytes(), b"correct horse battery staple");
        assert_eq!(exposed.as_str(), Some("correct horse battery staple"));
        assert_eq!(secret.len(), 28);
    }

    #[test]
    fn test_empty_secret() {
        let secret = Secret::new(Vec::<u8>::new());
        assert!(secret.is_empty());
        assert!(secret.expose().is_empty());
    }

    #[test]
    fn test_non_utf8_secret() {
        let secret = Secret::new(vec![0xff, 0xfe]);
        assert_eq!(secret.expose().as_str(), None);
    }

    #[test]
    fn test_wipe_hook_fires_once_per_exposure() {
        let wipes = Arc::new(AtomicUsize::new(0));
        let counter = wipes.clone();
        let secret = Secret::from("hunter22").with_wipe_hook(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        {
            let exposed = secret.expose();
            assert_eq!(&*exposed, b"hunter22");
            assert_eq!(wipes.load(Ordering::SeqCst), 0);
        }
        assert_eq!(wipes.load(Ordering::SeqCst), 1);

        drop(secret.expose());
        assert_eq!(wipes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_wipe_hook_fires_during_unwind() {
        let wipes = Arc::new(AtomicUsize::new(0));
        let counter = wipes.clone();
        let secret = Secret::from("hunter22").with_wipe_hook(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _exposed = secret.expose();
            panic!("verifier blew up");
        }));

        assert!(result.is_err());
        assert_eq!(wipes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = Secret::from("hunter22");
        let rendered = format!("{:?}", secret);

        assert!(rendered.starts_with("Secret("));
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("hunter22"));
        assert_eq!(format!("{:?}", secret.expose()), "ExposedSecret([REDACTED])");
    }
}
