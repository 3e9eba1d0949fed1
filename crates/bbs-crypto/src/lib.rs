/// BBS Crypto Library
///
/// One-way derivations for values that must never be stored as typed.
/// Currently only the poster seed, which is shown as a SHA-256 display token.

pub mod seed;
