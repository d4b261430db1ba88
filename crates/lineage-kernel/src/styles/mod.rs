//! Built-in numbering styles.
//!
//! - [`DAboville`]: dotted decimal, optional spouse letters
//! - [`Henry`]: undotted digits with `X`/letters or parenthesised 10+
//! - [`Ngsq`]: running counter plus a Roman numeral per child

pub mod daboville;
pub mod henry;
pub mod ngsq;

pub use daboville::DAboville;
pub use henry::Henry;
pub use ngsq::Ngsq;

/// Capital letter for a 0-based offset from `A`, if it stays within `Z`.
pub(crate) fn capital_letter(offset: u32) -> Option<char> {
    (offset < 26).then(|| char::from(b'A' + offset as u8))
}

/// Lowercase letter for a 0-based offset from `a`, if it stays within `z`.
pub(crate) fn lowercase_letter(offset: u32) -> Option<char> {
    (offset < 26).then(|| char::from(b'a' + offset as u8))
}
