//! Contact points produced by the narrow-phase.

pub use self::contact::Contact;

mod contact;
