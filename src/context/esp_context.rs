//! The ESP cryptographic context: per-SA cipher/MAC ownership plus the
//! sequence-number and anti-replay-window state RFC 4303 requires.

use tracing::{debug, trace, warn};

use crate::core::{
    CipherAlgorithm, CipherHandle, ConstructionError, CryptoFactory, MacAlgorithm, MacHandle,
    DEFAULT_WINDOW_SIZE,
};

use super::window::ReplayWindow;

/// Direction-dependent state.
///
/// Modeling this as a sum type rather than a boolean flag plus "unused when
/// outbound" fields makes the first invariant of the ESP context structural:
/// an `Outbound` value has no window field to misuse in the first place.
enum Direction {
    Outbound { last_seqno: u32 },
    Inbound { last_seqno: u32, window: ReplayWindow },
}

/// A single-owner, per-SA ESP cryptographic context.
///
/// Bound to one direction (inbound or outbound) of one Security Association
/// at construction time. Carries a keyed cipher handle, a keyed MAC handle,
/// and — for inbound contexts — the sequence-number high-water mark and
/// anti-replay window from RFC 4303 §3.4.3.
///
/// `EspContext` is not shareable across threads without external
/// synchronization: it implements `Send` but not `Sync`. See the crate's
/// concurrency notes for what that means for concurrent `verify_seqno`.
pub struct EspContext {
    cipher: Box<dyn CipherHandle>,
    mac: Box<dyn MacHandle>,
    direction: Direction,
}

impl EspContext {
    /// Construct a new ESP context bound to one SA direction, using the
    /// default 128-bit anti-replay window.
    pub fn create(
        factory: &dyn CryptoFactory,
        enc_alg: CipherAlgorithm,
        enc_key: &[u8],
        int_alg: MacAlgorithm,
        int_key: &[u8],
        inbound: bool,
    ) -> Result<Self, ConstructionError> {
        Self::create_with_window(factory, enc_alg, enc_key, int_alg, int_key, inbound, DEFAULT_WINDOW_SIZE)
    }

    /// Construct a new ESP context with an explicit anti-replay window
    /// width in bits. `window_size` must be a positive multiple of 8; it is
    /// ignored for outbound contexts (which carry no window).
    pub fn create_with_window(
        factory: &dyn CryptoFactory,
        enc_alg: CipherAlgorithm,
        enc_key: &[u8],
        int_alg: MacAlgorithm,
        int_key: &[u8],
        inbound: bool,
        window_size: u32,
    ) -> Result<Self, ConstructionError> {
        if inbound && (window_size == 0 || window_size % 8 != 0) {
            warn!(target: "esp", window_size, "failed to create ESP context: invalid window size");
            return Err(ConstructionError::InvalidWindowSize(window_size));
        }

        let mut cipher = factory.create_cipher(enc_alg, enc_key.len()).ok_or_else(|| {
            warn!(target: "esp", "failed to create ESP context: unsupported encryption algorithm");
            ConstructionError::UnsupportedCipher
        })?;
        if !cipher.set_key(enc_key) {
            warn!(target: "esp", "failed to create ESP context: setting encryption key failed");
            return Err(ConstructionError::CipherKeyRejected);
        }

        let mut mac = factory.create_mac(int_alg).ok_or_else(|| {
            warn!(target: "esp", "failed to create ESP context: unsupported integrity algorithm");
            ConstructionError::UnsupportedMac
        })?;
        if !mac.set_key(int_key) {
            warn!(target: "esp", "failed to create ESP context: setting integrity key failed");
            return Err(ConstructionError::MacKeyRejected);
        }

        let direction = if inbound {
            Direction::Inbound { last_seqno: 0, window: ReplayWindow::new(window_size) }
        } else {
            Direction::Outbound { last_seqno: 0 }
        };

        debug!(target: "esp", inbound, "created ESP context");
        Ok(Self { cipher, mac, direction })
    }

    /// Whether this context was constructed for inbound traffic.
    pub fn is_inbound(&self) -> bool {
        matches!(self.direction, Direction::Inbound { .. })
    }

    /// Borrow the owned cipher handle. The context never calls it; it is
    /// retained for the caller's packet data path.
    pub fn get_cipher(&self) -> &dyn CipherHandle {
        self.cipher.as_ref()
    }

    /// Borrow the owned MAC handle. The context never calls it; it is
    /// retained for the caller's packet data path.
    pub fn get_mac(&self) -> &dyn MacHandle {
        self.mac.as_ref()
    }

    /// Outbound: the last sequence number assigned. Inbound: the highest
    /// sequence number authenticated so far.
    pub fn get_seqno(&self) -> u32 {
        match &self.direction {
            Direction::Outbound { last_seqno } => *last_seqno,
            Direction::Inbound { last_seqno, .. } => *last_seqno,
        }
    }

    /// Assign and return the next outbound sequence number. Returns `None`
    /// on an inbound context, or once the counter has reached `u32::MAX`
    /// (the caller should treat that as a signal to rekey the SA).
    ///
    /// The first successful call on a freshly constructed context returns
    /// `Some(1)` — sequence number 0 is never emitted.
    pub fn next_seqno(&mut self) -> Option<u32> {
        match &mut self.direction {
            Direction::Inbound { .. } => None,
            Direction::Outbound { last_seqno } => {
                if *last_seqno == u32::MAX {
                    None
                } else {
                    *last_seqno += 1;
                    Some(*last_seqno)
                }
            }
        }
    }

    /// Non-destructive inbound replay check. Always `false` on an outbound
    /// context and for sequence number 0.
    ///
    /// - Ahead of the window (`seqno > last_seqno`): accepted.
    /// - Inside the window: accepted iff not already marked.
    /// - Behind the window, or `seqno == 0`: rejected.
    pub fn verify_seqno(&self, seqno: u32) -> bool {
        let Direction::Inbound { last_seqno, window } = &self.direction else {
            return false;
        };
        if seqno > *last_seqno {
            true
        } else if seqno > 0 && last_seqno - seqno < window.window_size() {
            !window.is_accepted_at_distance(last_seqno - seqno)
        } else {
            false
        }
    }

    /// Commit a verified, MAC-authenticated sequence number into the
    /// window. A no-op on outbound contexts.
    ///
    /// Callers must have already observed `verify_seqno(seqno) == true` and
    /// authenticated the packet; this method does not re-verify. Committing
    /// an already-accepted in-window seqno is silently idempotent.
    pub fn set_authenticated_seqno(&mut self, seqno: u32) {
        let Direction::Inbound { last_seqno, window } = &mut self.direction else {
            return;
        };
        if seqno > *last_seqno {
            let shift = (seqno - *last_seqno).min(window.window_size());
            window.advance(shift);
            *last_seqno = seqno;
        } else {
            let distance = *last_seqno - seqno;
            if distance < window.window_size() {
                window.accept_at_distance(distance);
            } else {
                trace!(target: "esp", seqno, last_seqno, "ignoring commit below replay window");
            }
        }
    }
}

impl Drop for EspContext {
    fn drop(&mut self) {
        trace!(target: "esp", inbound = self.is_inbound(), "destroying ESP context");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::DefaultCryptoFactory;

    fn outbound() -> EspContext {
        EspContext::create(
            &DefaultCryptoFactory::new(),
            CipherAlgorithm::EncrAesCbc,
            &[0x11u8; 16],
            MacAlgorithm::AuthHmacSha2_256_128,
            b"integrity key",
            false,
        )
        .unwrap()
    }

    fn inbound() -> EspContext {
        EspContext::create(
            &DefaultCryptoFactory::new(),
            CipherAlgorithm::EncrAesCbc,
            &[0x11u8; 16],
            MacAlgorithm::AuthHmacSha2_256_128,
            b"integrity key",
            true,
        )
        .unwrap()
    }

    fn inbound_with_window(window_size: u32) -> EspContext {
        EspContext::create_with_window(
            &DefaultCryptoFactory::new(),
            CipherAlgorithm::EncrAesCbc,
            &[0x11u8; 16],
            MacAlgorithm::AuthHmacSha2_256_128,
            b"integrity key",
            true,
            window_size,
        )
        .unwrap()
    }

    #[test]
    fn outbound_assigns_monotone_seqnos_starting_at_one() {
        let mut ctx = outbound();
        for expected in 1..=5u32 {
            assert_eq!(ctx.next_seqno(), Some(expected));
        }
        assert_eq!(ctx.get_seqno(), 5);
    }

    #[test]
    fn outbound_ignores_invalid_window_size() {
        let ctx = EspContext::create_with_window(
            &DefaultCryptoFactory::new(),
            CipherAlgorithm::EncrAesCbc,
            &[0x11u8; 16],
            MacAlgorithm::AuthHmacSha2_256_128,
            b"integrity key",
            false,
            17,
        )
        .expect("window_size is unused and unvalidated for outbound contexts");
        assert!(!ctx.is_inbound());
    }

    #[test]
    fn outbound_rejects_verify_and_ignores_commit() {
        let mut ctx = outbound();
        ctx.next_seqno();
        assert!(!ctx.verify_seqno(1));
        ctx.set_authenticated_seqno(1);
        assert_eq!(ctx.get_seqno(), 1);
    }

    #[test]
    fn outbound_exhaustion_is_sticky() {
        let mut ctx = outbound();
        if let Direction::Outbound { last_seqno } = &mut ctx.direction {
            *last_seqno = u32::MAX;
        }
        assert_eq!(ctx.next_seqno(), None);
        assert_eq!(ctx.get_seqno(), u32::MAX);
        assert_eq!(ctx.next_seqno(), None);
    }

    #[test]
    fn inbound_rejects_next_seqno() {
        let mut ctx = inbound();
        assert_eq!(ctx.next_seqno(), None);
    }

    #[test]
    fn inbound_rejects_seqno_zero() {
        let ctx = inbound();
        assert!(!ctx.verify_seqno(0));
    }

    #[test]
    fn scenario_s1_monotone_accept() {
        let mut ctx = inbound();
        for s in 1..=3u32 {
            assert!(ctx.verify_seqno(s));
            ctx.set_authenticated_seqno(s);
        }
        assert!(ctx.verify_seqno(4));
        assert!(!ctx.verify_seqno(3));
        assert!(!ctx.verify_seqno(2));
        assert!(!ctx.verify_seqno(1));
    }

    #[test]
    fn scenario_s2_in_window_reorder() {
        let mut ctx = inbound();
        ctx.set_authenticated_seqno(10);
        assert!(ctx.verify_seqno(5));
        ctx.set_authenticated_seqno(5);
        assert!(!ctx.verify_seqno(5));
        assert!(!ctx.verify_seqno(10));
        assert!(ctx.verify_seqno(11));
    }

    #[test]
    fn scenario_s3_below_window_edge() {
        // window_size defaults to 128. 200 - 71 = 129 (behind). 200 - 72 =
        // 128, exactly the window width, which the strict-`<` edge test in
        // `verify_seqno` also rejects (see DESIGN.md's note on the S3
        // boundary value).
        let mut ctx = inbound();
        ctx.set_authenticated_seqno(200);
        assert!(!ctx.verify_seqno(71));
        assert!(!ctx.verify_seqno(72));
        assert!(ctx.verify_seqno(73));
    }

    #[test]
    fn scenario_s4_big_jump_resets_window() {
        let mut ctx = inbound();
        ctx.set_authenticated_seqno(1);
        ctx.set_authenticated_seqno(1000);
        assert!(ctx.verify_seqno(999));
        assert!(!ctx.verify_seqno(1));
        assert!(!ctx.verify_seqno(1000));
    }

    #[test]
    fn scenario_s6_exhaustion_is_permanent() {
        let mut ctx = outbound();
        if let Direction::Outbound { last_seqno } = &mut ctx.direction {
            *last_seqno = u32::MAX - 1;
        }
        assert_eq!(ctx.next_seqno(), Some(u32::MAX));
        assert_eq!(ctx.next_seqno(), None);
        assert_eq!(ctx.get_seqno(), u32::MAX);
    }

    #[test]
    fn replay_idempotence() {
        let mut ctx = inbound();
        ctx.set_authenticated_seqno(10);
        ctx.set_authenticated_seqno(10);
        ctx.set_authenticated_seqno(10);
        assert!(!ctx.verify_seqno(10));
        assert!(ctx.verify_seqno(11));
    }

    #[test]
    fn window_horizon_boundary_values() {
        for &window_size in &[8u32, 16, 128, 1024] {
            let mut ctx = inbound_with_window(window_size);
            let high = window_size * 3;
            ctx.set_authenticated_seqno(high);
            assert!(!ctx.verify_seqno(high - window_size));
            assert!(ctx.verify_seqno(high - window_size + 1));
        }
    }

    #[test]
    fn get_seqno_matches_last_seqno_after_operations() {
        let mut ctx = inbound();
        assert_eq!(ctx.get_seqno(), 0);
        ctx.set_authenticated_seqno(42);
        assert_eq!(ctx.get_seqno(), 42);
        ctx.set_authenticated_seqno(10);
        assert_eq!(ctx.get_seqno(), 42);
    }

    #[test]
    fn get_cipher_and_mac_are_usable() {
        let ctx = outbound();
        assert_eq!(ctx.get_cipher().algorithm(), CipherAlgorithm::EncrAesCbc);
        assert_eq!(ctx.get_mac().algorithm(), MacAlgorithm::AuthHmacSha2_256_128);
    }
}
