use rand::Rng;

/// Length of the opaque token handed to guests.
pub const CODE_LENGTH: usize = 8;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Source of confirmation codes, injected into the booking service so tests
/// can script deterministic sequences. Uniqueness is enforced by storage;
/// the booking service regenerates on collision.
pub trait ConfirmationCodes: Send + Sync {
    fn generate(&self) -> String;
}

/// Default source drawing 8 characters from an uppercase alphabet with the
/// ambiguous glyphs (0/O, 1/I) removed.
#[derive(Debug, Default, Clone)]
pub struct RandomCodes;

impl ConfirmationCodes for RandomCodes {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..CODE_LENGTH)
            .map(|_| {
                let idx = rng.gen_range(0..CODE_ALPHABET.len());
                CODE_ALPHABET[idx] as char
            })
            .collect()
    }
}
