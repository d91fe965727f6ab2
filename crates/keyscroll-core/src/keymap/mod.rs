//! Key name translation for X11.
//!
//! The settings string names keys symbolically (`"Up"`, `"Page_Down"`,
//! `"XF86AudioRaiseVolume"`).  These are resolved to X11 KeySym values here;
//! turning a KeySym into a server-specific keycode needs a live display and
//! is left to the emulator in `keyscroll-daemon`.

pub mod linux_x11;

/// An X11 KeySym value as defined in `X11/keysymdef.h`.
pub type Keysym = u32;

/// Unified key mapper.
pub struct KeyMapper;

impl KeyMapper {
    /// Translates a symbolic X11 key name to its KeySym.
    ///
    /// Returns `None` for names X11 does not know, mirroring
    /// `XStringToKeysym` returning `NoSymbol`.
    pub fn keysym_from_name(name: &str) -> Option<Keysym> {
        linux_x11::name_to_keysym(name)
    }
}
