//! Settings grammar for the scroll action.
//!
//! A settings string is a list of colon separated fields.  Three grammars
//! exist, one per [`ScrollVariant`]:
//!
//! ```text
//! positional   SPEED=5:Control+Up+Down
//! key_chord    SPEED=5:MOD=Control+Shift:UP=Prior:DOWN=Next:LEFT=a:RIGHT=b
//! mouse_wheel  INVERTED=true:SPEED=3
//! ```
//!
//! The user-facing speed (1 = slowest, 10 = fastest) becomes a threshold, the
//! amount of finger motion needed for one tick, through a linear
//! [`SpeedCurve`]: `threshold = base - step * speed`.
//!
//! Parsing is atomic.  [`ScrollSettings::parse`] either returns a complete
//! configuration or an error; [`ScrollSettings::load`] turns a parse error
//! into the full defaults plus one warning.  The only error `load` returns is
//! a speed curve that can produce a threshold of zero or less, because such a
//! threshold would never let the accumulator drain.

use std::collections::HashSet;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::direction::{Direction, DirectionMap};
use crate::keymap::{linux_x11, KeyMapper, Keysym};

/// Inclusive range of the user-facing speed value.
pub const SPEED_RANGE: std::ops::RangeInclusive<i32> = 1..=10;

/// Threshold used on both axes when no valid `SPEED` is configured.
pub const DEFAULT_THRESHOLD: u32 = 30;

/// X11 core buttons 4 to 7 are the scroll wheel: up, down, left, right.
pub const WHEEL_BUTTONS: DirectionMap<u8> = DirectionMap {
    up: 4,
    down: 5,
    left: 6,
    right: 7,
};

/// Errors produced while reading a settings string or speed curve.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A field is not of the form `KEY=VALUE`.
    #[error("malformed field {0:?}: expected KEY=VALUE")]
    MalformedField(String),

    /// The field name is not recognized by this variant.
    #[error("unknown setting {0:?}")]
    UnknownKey(String),

    /// The same field name appears twice.
    #[error("setting {0:?} given more than once")]
    DuplicateKey(String),

    /// The positional grammar needs an exact number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// `SPEED` is not an integer.
    #[error("speed {0:?} is not an integer")]
    InvalidSpeed(String),

    /// `SPEED` is an integer outside 1..=10.
    #[error("speed {0} is outside 1..=10")]
    SpeedOutOfRange(i32),

    /// A `MOD` entry is not Control, Shift, Super, Alt or AltGr.
    #[error("unknown modifier {0:?}")]
    UnknownModifier(String),

    /// `INVERTED` is neither `true` nor `false`.
    #[error("invalid boolean {0:?}")]
    InvalidBool(String),

    /// The speed curve yields a threshold that is not a positive integer.
    #[error("speed curve {base} - {step} * {speed} yields unusable threshold {threshold}")]
    InvalidThreshold {
        base: i32,
        step: i32,
        speed: i32,
        threshold: i64,
    },
}

impl SettingsError {
    /// Fatal errors abort action construction instead of falling back to
    /// the defaults.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SettingsError::InvalidThreshold { .. })
    }
}

/// Motion needed to produce one tick.  Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Threshold(NonZeroU32);

impl Threshold {
    pub const DEFAULT: Threshold = match NonZeroU32::new(DEFAULT_THRESHOLD) {
        Some(value) => Threshold(value),
        None => panic!("default threshold must be non-zero"),
    };

    /// Returns `None` unless `value` is in `1..=u32::MAX`.
    pub fn new(value: i64) -> Option<Self> {
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Threshold)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Linear mapping from user speed to threshold: `base - step * speed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedCurve {
    pub base: i32,
    pub step: i32,
}

impl SpeedCurve {
    /// Curve of the two-field positional grammar.
    pub const POSITIONAL: SpeedCurve = SpeedCurve { base: 100, step: 2 };
    /// Curve of the `KEY=VALUE` key chord grammar.
    pub const KEY_CHORD: SpeedCurve = SpeedCurve {
        base: 220,
        step: 20,
    };
    /// Curve of the mouse wheel grammar.
    pub const MOUSE_WHEEL: SpeedCurve = SpeedCurve { base: 40, step: 2 };

    /// Threshold for `speed`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidThreshold`] if the result is not a
    /// positive `u32`.
    pub fn threshold(&self, speed: i32) -> Result<Threshold, SettingsError> {
        let value = i64::from(self.base) - i64::from(self.step) * i64::from(speed);
        Threshold::new(value).ok_or(SettingsError::InvalidThreshold {
            base: self.base,
            step: self.step,
            speed,
            threshold: value,
        })
    }

    /// Checks that every speed in 1..=10 yields a usable threshold.
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError::InvalidThreshold`] found.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for speed in SPEED_RANGE {
            self.threshold(speed)?;
        }
        Ok(())
    }
}

/// Which settings grammar and output strategy an action uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollVariant {
    /// `SPEED=n:<mods and keys joined by +>`, exactly two fields.
    Positional,
    /// `KEY=VALUE` fields in any order: SPEED, MOD, UP, DOWN, LEFT, RIGHT.
    #[default]
    KeyChord,
    /// `KEY=VALUE` fields in any order: SPEED, INVERTED.  Emits wheel buttons.
    MouseWheel,
}

impl ScrollVariant {
    pub fn default_curve(self) -> SpeedCurve {
        match self {
            ScrollVariant::Positional => SpeedCurve::POSITIONAL,
            ScrollVariant::KeyChord => SpeedCurve::KEY_CHORD,
            ScrollVariant::MouseWheel => SpeedCurve::MOUSE_WHEEL,
        }
    }
}

/// A modifier name accepted in `MOD` lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Control,
    Shift,
    Super,
    Alt,
    AltGr,
}

impl Modifier {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Control" => Some(Modifier::Control),
            "Shift" => Some(Modifier::Shift),
            "Super" => Some(Modifier::Super),
            "Alt" => Some(Modifier::Alt),
            "AltGr" => Some(Modifier::AltGr),
            _ => None,
        }
    }

    /// The physical key held for this modifier: the left one, except AltGr
    /// which is the right Alt key.
    pub fn keysym(self) -> Keysym {
        match self {
            Modifier::Control => linux_x11::XK_CONTROL_L,
            Modifier::Shift => linux_x11::XK_SHIFT_L,
            Modifier::Super => linux_x11::XK_SUPER_L,
            Modifier::Alt => linux_x11::XK_ALT_L,
            Modifier::AltGr => linux_x11::XK_ALT_R,
        }
    }
}

/// What a tick turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSettings {
    /// Hold `modifiers` for the whole gesture and tap one key per tick.
    /// A `None` key silently drops ticks in that direction.
    KeyChord {
        modifiers: Vec<Modifier>,
        keys: DirectionMap<Option<Keysym>>,
    },
    /// Click one wheel button per tick.
    MouseButtons { inverted: bool },
}

impl OutputSettings {
    fn defaults(variant: ScrollVariant) -> Self {
        match variant {
            ScrollVariant::Positional | ScrollVariant::KeyChord => OutputSettings::KeyChord {
                modifiers: Vec::new(),
                keys: DirectionMap::default(),
            },
            ScrollVariant::MouseWheel => OutputSettings::MouseButtons { inverted: false },
        }
    }
}

/// Maps each direction to its wheel button, swapping both axes when
/// `inverted` is set.
pub fn wheel_buttons(inverted: bool) -> DirectionMap<u8> {
    if !inverted {
        return WHEEL_BUTTONS;
    }
    let mut buttons = WHEEL_BUTTONS;
    for direction in Direction::ALL {
        *buttons.get_mut(direction) = *WHEEL_BUTTONS.get(direction.opposite());
    }
    buttons
}

/// Fully parsed, immutable scroll configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollSettings {
    pub horizontal: Threshold,
    pub vertical: Threshold,
    pub output: OutputSettings,
}

/// Result of [`ScrollSettings::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    pub settings: ScrollSettings,
    /// The parse error that caused a fallback to the defaults, if any.
    pub fallback: Option<SettingsError>,
}

impl ScrollSettings {
    /// Built-in defaults: 30 on both axes, no modifiers, no keys,
    /// non-inverted wheel buttons.
    pub fn defaults(variant: ScrollVariant) -> Self {
        Self {
            horizontal: Threshold::DEFAULT,
            vertical: Threshold::DEFAULT,
            output: OutputSettings::defaults(variant),
        }
    }

    /// Parses `input` with the grammar of `variant`.
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError`] encountered; nothing is partially
    /// applied.
    pub fn parse(
        variant: ScrollVariant,
        curve: SpeedCurve,
        input: &str,
    ) -> Result<Self, SettingsError> {
        match variant {
            ScrollVariant::Positional => parse_positional(curve, input),
            ScrollVariant::KeyChord | ScrollVariant::MouseWheel => {
                parse_fields(variant, curve, input)
            }
        }
    }

    /// Parses `input`, falling back to [`ScrollSettings::defaults`] with a
    /// single warning when it is malformed.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidThreshold`] when `curve` can yield a
    /// non-positive threshold for some speed in 1..=10.
    pub fn load(
        variant: ScrollVariant,
        curve: SpeedCurve,
        input: &str,
    ) -> Result<LoadedSettings, SettingsError> {
        curve.validate()?;

        match Self::parse(variant, curve, input) {
            Ok(settings) => Ok(LoadedSettings {
                settings,
                fallback: None,
            }),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!(
                    ?variant,
                    settings = input,
                    "error reading scroll settings ({e}), using the default settings"
                );
                Ok(LoadedSettings {
                    settings: Self::defaults(variant),
                    fallback: Some(e),
                })
            }
        }
    }
}

// ── Grammar ───────────────────────────────────────────────────────────────────

fn parse_positional(curve: SpeedCurve, input: &str) -> Result<ScrollSettings, SettingsError> {
    let fields: Vec<&str> = input.split(':').collect();
    if fields.len() != 2 {
        return Err(SettingsError::FieldCount {
            expected: 2,
            found: fields.len(),
        });
    }

    let (key, value) = split_field(fields[0])?;
    if key != "SPEED" {
        return Err(SettingsError::UnknownKey(key.to_string()));
    }
    let threshold = curve.threshold(parse_speed(value)?)?;

    // Modifier names are held; every other name fills the next free
    // direction (up, down, left, right).  Names past the fourth are ignored.
    let mut modifiers = Vec::new();
    let mut keys = DirectionMap::default();
    let mut directions = Direction::ALL.into_iter();
    for name in fields[1].split('+').map(str::trim) {
        if let Some(modifier) = Modifier::from_name(name) {
            modifiers.push(modifier);
        } else if let Some(direction) = directions.next() {
            *keys.get_mut(direction) = KeyMapper::keysym_from_name(name);
        }
    }

    Ok(ScrollSettings {
        horizontal: threshold,
        vertical: threshold,
        output: OutputSettings::KeyChord { modifiers, keys },
    })
}

fn parse_fields(
    variant: ScrollVariant,
    curve: SpeedCurve,
    input: &str,
) -> Result<ScrollSettings, SettingsError> {
    let mut settings = ScrollSettings::defaults(variant);
    if input.trim().is_empty() {
        return Ok(settings);
    }

    let mut seen = HashSet::new();
    for field in input.split(':') {
        let (key, value) = split_field(field)?;
        if !seen.insert(key) {
            return Err(SettingsError::DuplicateKey(key.to_string()));
        }

        match (&mut settings.output, key) {
            (_, "SPEED") => {
                let threshold = curve.threshold(parse_speed(value)?)?;
                settings.horizontal = threshold;
                settings.vertical = threshold;
            }
            (OutputSettings::KeyChord { modifiers, .. }, "MOD") => {
                *modifiers = value
                    .split('+')
                    .map(|name| {
                        Modifier::from_name(name)
                            .ok_or_else(|| SettingsError::UnknownModifier(name.to_string()))
                    })
                    .collect::<Result<_, _>>()?;
            }
            (OutputSettings::KeyChord { keys, .. }, "UP" | "DOWN" | "LEFT" | "RIGHT") => {
                let direction = match key {
                    "UP" => Direction::Up,
                    "DOWN" => Direction::Down,
                    "LEFT" => Direction::Left,
                    _ => Direction::Right,
                };
                *keys.get_mut(direction) = KeyMapper::keysym_from_name(value);
            }
            (OutputSettings::MouseButtons { inverted }, "INVERTED") => {
                *inverted = parse_bool(value)?;
            }
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
    }
    Ok(settings)
}

fn split_field(field: &str) -> Result<(&str, &str), SettingsError> {
    field
        .split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| SettingsError::MalformedField(field.to_string()))
}

fn parse_speed(value: &str) -> Result<i32, SettingsError> {
    let speed: i32 = value
        .parse()
        .map_err(|_| SettingsError::InvalidSpeed(value.to_string()))?;
    if SPEED_RANGE.contains(&speed) {
        Ok(speed)
    } else {
        Err(SettingsError::SpeedOutOfRange(speed))
    }
}

fn parse_bool(value: &str) -> Result<bool, SettingsError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(SettingsError::InvalidBool(value.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn key_chord(settings: &ScrollSettings) -> (&[Modifier], &DirectionMap<Option<Keysym>>) {
        match &settings.output {
            OutputSettings::KeyChord { modifiers, keys } => (modifiers, keys),
            other => panic!("expected key chord output, got {other:?}"),
        }
    }

    // ── Speed curves ──────────────────────────────────────────────────────────

    #[test]
    fn test_speed_five_yields_variant_specific_thresholds() {
        assert_eq!(SpeedCurve::POSITIONAL.threshold(5).unwrap().get(), 90);
        assert_eq!(SpeedCurve::KEY_CHORD.threshold(5).unwrap().get(), 120);
        assert_eq!(SpeedCurve::MOUSE_WHEEL.threshold(5).unwrap().get(), 30);
    }

    #[test]
    fn test_builtin_curves_are_valid_over_whole_speed_range() {
        for variant in [
            ScrollVariant::Positional,
            ScrollVariant::KeyChord,
            ScrollVariant::MouseWheel,
        ] {
            assert!(variant.default_curve().validate().is_ok(), "{variant:?}");
        }
    }

    #[test]
    fn test_curve_reaching_zero_is_rejected() {
        // Arrange – speed 10 gives 100 - 10 * 10 = 0
        let curve = SpeedCurve { base: 100, step: 10 };

        // Act
        let result = curve.validate();

        // Assert
        assert_eq!(
            result,
            Err(SettingsError::InvalidThreshold {
                base: 100,
                step: 10,
                speed: 10,
                threshold: 0,
            })
        );
    }

    #[test]
    fn test_threshold_new_rejects_zero_and_negative() {
        assert!(Threshold::new(0).is_none());
        assert!(Threshold::new(-5).is_none());
        assert!(Threshold::new(i64::from(u32::MAX) + 1).is_none());
        assert_eq!(Threshold::new(1).map(Threshold::get), Some(1));
    }

    // ── Positional grammar ────────────────────────────────────────────────────

    #[test]
    fn test_positional_parses_speed_modifiers_and_keys() {
        // Act
        let settings = ScrollSettings::parse(
            ScrollVariant::Positional,
            SpeedCurve::POSITIONAL,
            "SPEED=5:Control+Up+Down",
        )
        .unwrap();

        // Assert
        assert_eq!(settings.vertical.get(), 90);
        assert_eq!(settings.horizontal.get(), 90);
        let (modifiers, keys) = key_chord(&settings);
        assert_eq!(modifiers, [Modifier::Control]);
        assert_eq!(keys.up, Some(0xFF52));
        assert_eq!(keys.down, Some(0xFF54));
        assert_eq!(keys.left, None);
        assert_eq!(keys.right, None);
    }

    #[test]
    fn test_positional_third_and_fourth_keys_bind_left_and_right() {
        let settings = ScrollSettings::parse(
            ScrollVariant::Positional,
            SpeedCurve::POSITIONAL,
            "SPEED=1:Shift+a+b+c+d+e",
        )
        .unwrap();

        let (modifiers, keys) = key_chord(&settings);
        assert_eq!(modifiers, [Modifier::Shift]);
        assert_eq!(*keys, DirectionMap::new(Some(0x61), Some(0x62), Some(0x63), Some(0x64)));
    }

    #[test]
    fn test_positional_rejects_wrong_field_count() {
        let result =
            ScrollSettings::parse(ScrollVariant::Positional, SpeedCurve::POSITIONAL, "SPEED=5");
        assert_eq!(
            result,
            Err(SettingsError::FieldCount {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_positional_requires_speed_as_first_field() {
        let result = ScrollSettings::parse(
            ScrollVariant::Positional,
            SpeedCurve::POSITIONAL,
            "FAST=5:Up+Down",
        );
        assert_eq!(result, Err(SettingsError::UnknownKey("FAST".into())));
    }

    #[test]
    fn test_positional_unknown_key_name_becomes_null_key() {
        let settings = ScrollSettings::parse(
            ScrollVariant::Positional,
            SpeedCurve::POSITIONAL,
            "SPEED=5:NoSuchKey+Down",
        )
        .unwrap();

        let (_, keys) = key_chord(&settings);
        assert_eq!(keys.up, None);
        assert_eq!(keys.down, Some(0xFF54));
    }

    // ── KEY=VALUE grammar ─────────────────────────────────────────────────────

    #[test]
    fn test_key_chord_accepts_fields_in_any_order() {
        let settings = ScrollSettings::parse(
            ScrollVariant::KeyChord,
            SpeedCurve::KEY_CHORD,
            "DOWN=Next:MOD=Control+AltGr:SPEED=5:UP=Prior:RIGHT=b:LEFT=a",
        )
        .unwrap();

        assert_eq!(settings.vertical.get(), 120);
        let (modifiers, keys) = key_chord(&settings);
        assert_eq!(modifiers, [Modifier::Control, Modifier::AltGr]);
        assert_eq!(
            *keys,
            DirectionMap::new(Some(0xFF55), Some(0xFF56), Some(0x61), Some(0x62))
        );
    }

    #[test]
    fn test_key_chord_without_speed_keeps_default_threshold() {
        let settings =
            ScrollSettings::parse(ScrollVariant::KeyChord, SpeedCurve::KEY_CHORD, "UP=Up")
                .unwrap();
        assert_eq!(settings.vertical, Threshold::DEFAULT);
        assert_eq!(settings.horizontal, Threshold::DEFAULT);
    }

    #[test]
    fn test_key_chord_rejects_unknown_modifier() {
        let result = ScrollSettings::parse(
            ScrollVariant::KeyChord,
            SpeedCurve::KEY_CHORD,
            "MOD=Control+Hyper",
        );
        assert_eq!(result, Err(SettingsError::UnknownModifier("Hyper".into())));
    }

    #[test]
    fn test_key_chord_rejects_duplicate_key() {
        let result = ScrollSettings::parse(
            ScrollVariant::KeyChord,
            SpeedCurve::KEY_CHORD,
            "SPEED=2:SPEED=3",
        );
        assert_eq!(result, Err(SettingsError::DuplicateKey("SPEED".into())));
    }

    #[test]
    fn test_key_chord_rejects_inverted_field() {
        let result = ScrollSettings::parse(
            ScrollVariant::KeyChord,
            SpeedCurve::KEY_CHORD,
            "INVERTED=true",
        );
        assert_eq!(result, Err(SettingsError::UnknownKey("INVERTED".into())));
    }

    #[test]
    fn test_field_without_equals_is_malformed() {
        let result =
            ScrollSettings::parse(ScrollVariant::KeyChord, SpeedCurve::KEY_CHORD, "SPEED=2:UP");
        assert_eq!(result, Err(SettingsError::MalformedField("UP".into())));
    }

    #[test]
    fn test_empty_key_value_settings_are_defaults() {
        let settings =
            ScrollSettings::parse(ScrollVariant::MouseWheel, SpeedCurve::MOUSE_WHEEL, "")
                .unwrap();
        assert_eq!(settings, ScrollSettings::defaults(ScrollVariant::MouseWheel));
    }

    #[test]
    fn test_speed_out_of_range_is_rejected() {
        for (input, expected) in [
            ("SPEED=0", SettingsError::SpeedOutOfRange(0)),
            ("SPEED=11", SettingsError::SpeedOutOfRange(11)),
            ("SPEED=fast", SettingsError::InvalidSpeed("fast".into())),
        ] {
            let result =
                ScrollSettings::parse(ScrollVariant::KeyChord, SpeedCurve::KEY_CHORD, input);
            assert_eq!(result, Err(expected), "{input}");
        }
    }

    // ── Mouse wheel grammar ───────────────────────────────────────────────────

    #[test]
    fn test_mouse_wheel_parses_inverted_flag() {
        let settings = ScrollSettings::parse(
            ScrollVariant::MouseWheel,
            SpeedCurve::MOUSE_WHEEL,
            "INVERTED=True:SPEED=10",
        )
        .unwrap();

        assert_eq!(settings.vertical.get(), 20);
        assert_eq!(settings.output, OutputSettings::MouseButtons { inverted: true });
    }

    #[test]
    fn test_mouse_wheel_rejects_non_boolean() {
        let result = ScrollSettings::parse(
            ScrollVariant::MouseWheel,
            SpeedCurve::MOUSE_WHEEL,
            "INVERTED=yes",
        );
        assert_eq!(result, Err(SettingsError::InvalidBool("yes".into())));
    }

    #[test]
    fn test_wheel_buttons_swap_when_inverted() {
        assert_eq!(wheel_buttons(false), DirectionMap::new(4, 5, 6, 7));
        assert_eq!(wheel_buttons(true), DirectionMap::new(5, 4, 7, 6));
    }

    // ── Fallback ──────────────────────────────────────────────────────────────

    #[test]
    fn test_load_falls_back_to_defaults_on_malformed_input() {
        // Act
        let loaded = ScrollSettings::load(
            ScrollVariant::KeyChord,
            SpeedCurve::KEY_CHORD,
            "MOD=Control:SPEED=11:UP=a",
        )
        .unwrap();

        // Assert – the MOD field parsed before the error is not kept
        assert_eq!(loaded.settings, ScrollSettings::defaults(ScrollVariant::KeyChord));
        assert_eq!(loaded.fallback, Some(SettingsError::SpeedOutOfRange(11)));
    }

    #[test]
    fn test_load_reports_no_fallback_for_valid_input() {
        let loaded =
            ScrollSettings::load(ScrollVariant::MouseWheel, SpeedCurve::MOUSE_WHEEL, "SPEED=5")
                .unwrap();
        assert!(loaded.fallback.is_none());
        assert_eq!(loaded.settings.vertical.get(), 30);
    }

    #[test]
    fn test_load_with_invalid_curve_is_fatal_even_for_valid_input() {
        let curve = SpeedCurve { base: 10, step: 2 };
        let result = ScrollSettings::load(ScrollVariant::KeyChord, curve, "SPEED=1");
        assert!(matches!(result, Err(ref e) if e.is_fatal()));
    }

    #[test]
    fn test_altgr_holds_right_alt() {
        assert_eq!(
            Some(Modifier::AltGr.keysym()),
            KeyMapper::keysym_from_name("Alt_R")
        );
        assert_eq!(
            Some(Modifier::Alt.keysym()),
            KeyMapper::keysym_from_name("Alt_L")
        );
    }

    #[test]
    fn test_scroll_variant_deserializes_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            variant: ScrollVariant,
        }
        let parsed: Wrapper = toml::from_str("variant = \"mouse_wheel\"").unwrap();
        assert_eq!(parsed.variant, ScrollVariant::MouseWheel);
    }
}
