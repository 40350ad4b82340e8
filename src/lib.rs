//! # Authdeck – TOTP Authenticator Core
//!
//! Engine behind the token list of the desktop authenticator:
//!
//! - **RFC 4226 / 6238** – TOTP generation with SHA-1, SHA-256, SHA-512
//! - **Countdown** – seconds remaining and progress within the current period,
//!   including the two-sided arc sweep the token cards render
//! - **Service registry** – ordered accounts parsed from the app's JSON
//!   document, validated once, replaced wholesale on import
//! - **Refresh scheduler** – 1 Hz tick emitting per-service events, with the
//!   formatted token attached only when it actually changed
//! - **Persistence** – `tokens.json` in the per-user data directory, read at
//!   startup and overwritten on import
//!
//! Window, menu, file-dialog, and clipboard wiring live in the embedding
//! shell; this crate exposes the state, events, and on-demand token lookups
//! that shell consumes.

pub mod otp;
