//! Reusable UI pieces: small components plus the decorative rain painter.

pub mod components;
pub mod rain;
