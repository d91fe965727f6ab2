//! X11 key name to KeySym translation table.
//!
//! X11 KeySym values are defined in X11/keysymdef.h and X11/XF86keysym.h.
//! Reference: https://gitlab.freedesktop.org/xorg/proto/xorgproto/-/blob/master/include/X11/keysymdef.h
//!
//! # What is an X11 KeySym? (for beginners)
//!
//! X11 identifies keys by **KeySym** (Key Symbol), a number naming what the
//! key *means* rather than where it sits on the keyboard:
//!
//! | KeySym name | Value  | Meaning        |
//! |-------------|--------|----------------|
//! | `a`         | 0x0061 | lowercase 'a'  |
//! | `A`         | 0x0041 | uppercase 'A'  |
//! | `Return`    | 0xFF0D | Enter key      |
//! | `Prior`     | 0xFF55 | Page Up        |
//!
//! Users write these names in the settings string (`UP=Prior`).  The table
//! below is the subset of `XStringToKeysym` that gesture bindings actually
//! use; anything else resolves to `None` and the binding becomes a null key.
//!
//! Single printable ASCII characters map to their own code point, and the
//! `0x...` hexadecimal form is accepted for keysyms the table does not name.

use super::Keysym;

pub const XK_CONTROL_L: Keysym = 0xFFE3;
pub const XK_SHIFT_L: Keysym = 0xFFE1;
pub const XK_ALT_L: Keysym = 0xFFE9;
pub const XK_ALT_R: Keysym = 0xFFEA;
pub const XK_SUPER_L: Keysym = 0xFFEB;

/// Translates an X11 key name to its KeySym value.
///
/// Names are case-sensitive, as in X11 (`"a"` and `"A"` differ).
pub fn name_to_keysym(name: &str) -> Option<Keysym> {
    if let Some(keysym) = single_char_keysym(name) {
        return Some(keysym);
    }
    if let Some(keysym) = function_key_keysym(name) {
        return Some(keysym);
    }
    if let Some(hex) = name.strip_prefix("0x") {
        return Keysym::from_str_radix(hex, 16).ok().filter(|&k| k != 0);
    }

    let keysym = match name {
        // Editing and control
        "BackSpace" => 0xFF08,
        "Tab" => 0xFF09,
        "Return" => 0xFF0D,
        "Pause" => 0xFF13,
        "Scroll_Lock" => 0xFF14,
        "Escape" => 0xFF1B,
        "Delete" => 0xFFFF,
        "Insert" => 0xFF63,
        "Print" => 0xFF61,
        "Menu" => 0xFF67,
        "Caps_Lock" => 0xFFE5,
        "Num_Lock" => 0xFF7F,
        "space" => 0x0020,

        // Navigation
        "Home" => 0xFF50,
        "Left" => 0xFF51,
        "Up" => 0xFF52,
        "Right" => 0xFF53,
        "Down" => 0xFF54,
        "Prior" | "Page_Up" => 0xFF55,
        "Next" | "Page_Down" => 0xFF56,
        "End" => 0xFF57,

        // Keypad
        "KP_Enter" => 0xFF8D,
        "KP_Multiply" => 0xFFAA,
        "KP_Add" => 0xFFAB,
        "KP_Subtract" => 0xFFAD,
        "KP_Decimal" => 0xFFAE,
        "KP_Divide" => 0xFFAF,
        "KP_0" => 0xFFB0,
        "KP_1" => 0xFFB1,
        "KP_2" => 0xFFB2,
        "KP_3" => 0xFFB3,
        "KP_4" => 0xFFB4,
        "KP_5" => 0xFFB5,
        "KP_6" => 0xFFB6,
        "KP_7" => 0xFFB7,
        "KP_8" => 0xFFB8,
        "KP_9" => 0xFFB9,

        // Punctuation by name
        "minus" => 0x002D,
        "equal" => 0x003D,
        "plus" => 0x002B,
        "bracketleft" => 0x005B,
        "bracketright" => 0x005D,
        "backslash" => 0x005C,
        "semicolon" => 0x003B,
        "apostrophe" => 0x0027,
        "grave" => 0x0060,
        "comma" => 0x002C,
        "period" => 0x002E,
        "slash" => 0x002F,

        // Modifiers
        "Shift_L" => XK_SHIFT_L,
        "Shift_R" => 0xFFE2,
        "Control_L" => XK_CONTROL_L,
        "Control_R" => 0xFFE4,
        "Meta_L" => 0xFFE7,
        "Meta_R" => 0xFFE8,
        "Alt_L" => XK_ALT_L,
        "Alt_R" => XK_ALT_R,
        "Super_L" => XK_SUPER_L,
        "Super_R" => 0xFFEC,
        "Hyper_L" => 0xFFED,
        "Hyper_R" => 0xFFEE,
        "ISO_Level3_Shift" => 0xFE03,

        // XF86 media and zoom keys
        "XF86MonBrightnessUp" => 0x1008_FF02,
        "XF86MonBrightnessDown" => 0x1008_FF03,
        "XF86AudioLowerVolume" => 0x1008_FF11,
        "XF86AudioMute" => 0x1008_FF12,
        "XF86AudioRaiseVolume" => 0x1008_FF13,
        "XF86AudioPlay" => 0x1008_FF14,
        "XF86AudioStop" => 0x1008_FF15,
        "XF86AudioPrev" => 0x1008_FF16,
        "XF86AudioNext" => 0x1008_FF17,
        "XF86Back" => 0x1008_FF26,
        "XF86Forward" => 0x1008_FF27,
        "XF86ZoomIn" => 0x1008_FF8B,
        "XF86ZoomOut" => 0x1008_FF8C,

        _ => return None,
    };
    Some(keysym)
}

/// Printable ASCII characters (`a`, `Z`, `5`, `-`) are their own KeySym.
fn single_char_keysym(name: &str) -> Option<Keysym> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_graphic() => Some(c as Keysym),
        _ => None,
    }
}

/// `F1` to `F24` are contiguous starting at 0xFFBE.
fn function_key_keysym(name: &str) -> Option<Keysym> {
    let n: Keysym = name.strip_prefix('F')?.parse().ok()?;
    if (1..=24).contains(&n) && !name[1..].starts_with('0') {
        Some(0xFFBE + n - 1)
    } else {
        None
    }
}
