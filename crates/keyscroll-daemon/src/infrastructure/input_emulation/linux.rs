//! Linux X11 input emulation via the XTest extension.
//!
//! Uses `XTestFakeKeyEvent` and `XTestFakeButtonEvent` to inject input into
//! the X11 session, and a `_NET_ACTIVE_WINDOW` client message to bring the
//! target window to the front.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a process synthesize keyboard
//! and mouse events as if the user had physically interacted with the
//! hardware.  The events go to the focused window exactly like real input.
//!
//! - `XTestFakeKeyEvent(display, keycode, is_press, delay)` – press or
//!   release a key.
//! - `XTestFakeButtonEvent(display, button, is_press, delay)` – press or
//!   release a pointer button.  Buttons 4 to 7 are the scroll wheel.
//!
//! `XTestFakeKeyEvent` takes a *keycode*, not a KeySym.  The conversion
//! depends on the active keyboard layout and is asked of the server:
//! ```text
//! key name → KeySym (keyscroll-core) → XKeysymToKeycode(display, keysym) → keycode
//! ```
//!
//! # Window activation
//!
//! Synthetic key events only reach the focused window.  Before a gesture
//! scrolls, the target window is raised by sending the EWMH
//! `_NET_ACTIVE_WINDOW` client message to the root window, with source
//! indication 2 ("pager"), which window managers honour without focus
//! stealing prevention.
//!
//! # Permissions
//!
//! The process needs access to the X display, normally satisfied when it runs
//! in the user's session.  If `DISPLAY` is unset or the server refuses the
//! connection the constructor fails with `DisplayUnavailable`.

use std::ffi::CString;
use std::os::raw::{c_int, c_long, c_uint, c_ulong};
use std::ptr;
use std::sync::Mutex;

use keyscroll_core::Keysym;
use tracing::info;
use x11::{xlib, xtest};

use crate::application::emulate_input::{
    ButtonId, EmulationError, KeyCode, PlatformInputEmulator, WindowId,
};

/// XTest delay argument: deliver immediately.
const NO_DELAY: c_ulong = 0;

/// `_NET_ACTIVE_WINDOW` source indication for pagers and other tools acting
/// on behalf of the user.
const SOURCE_PAGER: c_long = 2;

/// Owned Xlib display connection.
struct DisplayHandle(*mut xlib::Display);

// SAFETY: Xlib connections may be moved between threads; the emulator only
// ever touches the pointer while holding its mutex, so calls never overlap.
unsafe impl Send for DisplayHandle {}

/// Linux X11/XTest input emulator.
pub struct LinuxXTestEmulator {
    display: Mutex<DisplayHandle>,
    root: xlib::Window,
    net_active_window: xlib::Atom,
}

impl LinuxXTestEmulator {
    /// Connects to the X display named `display_name`, or to `$DISPLAY` when
    /// `None`, and checks that the XTest extension is present.
    ///
    /// # Errors
    ///
    /// Returns `EmulationError::DisplayUnavailable` if the display cannot be
    /// opened and `EmulationError::Platform` if XTest is missing.
    pub fn new(display_name: Option<&str>) -> Result<Self, EmulationError> {
        let label = display_name.unwrap_or("$DISPLAY").to_string();
        let name = display_name
            .map(CString::new)
            .transpose()
            .map_err(|_| EmulationError::DisplayUnavailable(label.clone()))?;

        // SAFETY: `name` outlives the call; a null pointer selects $DISPLAY.
        let display =
            unsafe { xlib::XOpenDisplay(name.as_ref().map_or(ptr::null(), |n| n.as_ptr())) };
        if display.is_null() {
            return Err(EmulationError::DisplayUnavailable(label));
        }

        let (mut event_base, mut error_base, mut major, mut minor): (c_int, c_int, c_int, c_int) =
            (0, 0, 0, 0);
        // SAFETY: `display` is a live connection and the out-pointers are valid.
        let has_xtest = unsafe {
            xtest::XTestQueryExtension(
                display,
                &mut event_base,
                &mut error_base,
                &mut major,
                &mut minor,
            )
        } != 0;
        if !has_xtest {
            // SAFETY: `display` was opened above and is not used afterwards.
            unsafe { xlib::XCloseDisplay(display) };
            return Err(EmulationError::Platform(format!(
                "XTest extension not available on {label}"
            )));
        }

        // SAFETY: `display` is live; the atom name is NUL-terminated.
        let (root, net_active_window) = unsafe {
            (
                xlib::XDefaultRootWindow(display),
                xlib::XInternAtom(display, b"_NET_ACTIVE_WINDOW\0".as_ptr().cast(), xlib::False),
            )
        };

        info!(display = %label, "connected to X display (XTest {major}.{minor})");
        Ok(Self {
            display: Mutex::new(DisplayHandle(display)),
            root,
            net_active_window,
        })
    }

    fn with_display<T>(&self, f: impl FnOnce(*mut xlib::Display) -> T) -> Result<T, EmulationError> {
        let guard = self
            .display
            .lock()
            .map_err(|_| EmulationError::Platform("display mutex poisoned".into()))?;
        Ok(f(guard.0))
    }
}

impl Drop for LinuxXTestEmulator {
    fn drop(&mut self) {
        if let Ok(handle) = self.display.get_mut() {
            // SAFETY: the connection was opened in `new` and is closed once.
            unsafe { xlib::XCloseDisplay(handle.0) };
        }
    }
}

impl PlatformInputEmulator for LinuxXTestEmulator {
    fn keysym_to_keycode(&self, keysym: Keysym) -> Option<KeyCode> {
        // SAFETY: the display pointer is live for the lifetime of `self`.
        let keycode = self
            .with_display(|d| unsafe { xlib::XKeysymToKeycode(d, xlib::KeySym::from(keysym)) })
            .ok()?;
        // Keycode 0 means no key produces this KeySym.
        (keycode != 0).then_some(keycode)
    }

    fn emit_key(&self, keycode: KeyCode, pressed: bool) -> Result<(), EmulationError> {
        // SAFETY: the display pointer is live for the lifetime of `self`.
        let status = self.with_display(|d| unsafe {
            xtest::XTestFakeKeyEvent(d, c_uint::from(keycode), c_int::from(pressed), NO_DELAY)
        })?;
        if status == 0 {
            return Err(EmulationError::Platform(format!(
                "XTestFakeKeyEvent failed for keycode {keycode}"
            )));
        }
        Ok(())
    }

    fn emit_button(&self, button: ButtonId, pressed: bool) -> Result<(), EmulationError> {
        // SAFETY: the display pointer is live for the lifetime of `self`.
        let status = self.with_display(|d| unsafe {
            xtest::XTestFakeButtonEvent(d, c_uint::from(button), c_int::from(pressed), NO_DELAY)
        })?;
        if status == 0 {
            return Err(EmulationError::Platform(format!(
                "XTestFakeButtonEvent failed for button {button}"
            )));
        }
        Ok(())
    }

    fn activate_window(&self, window: WindowId) -> Result<(), EmulationError> {
        let status = self.with_display(|d| {
            let mut message = xlib::XClientMessageEvent {
                type_: xlib::ClientMessage,
                serial: 0,
                send_event: xlib::True,
                display: d,
                window: window as xlib::Window,
                message_type: self.net_active_window,
                format: 32,
                data: xlib::ClientMessageData::new(),
            };
            message.data.set_long(0, SOURCE_PAGER);
            message.data.set_long(1, xlib::CurrentTime as c_long);
            message.data.set_long(2, 0);
            let mut event = xlib::XEvent::from(message);

            // SAFETY: the display pointer is live and `event` is a fully
            // initialised client message.
            unsafe {
                xlib::XSendEvent(
                    d,
                    self.root,
                    xlib::False,
                    xlib::SubstructureNotifyMask | xlib::SubstructureRedirectMask,
                    &mut event,
                )
            }
        })?;
        if status == 0 {
            return Err(EmulationError::Platform(format!(
                "XSendEvent(_NET_ACTIVE_WINDOW) failed for window {window:#x}"
            )));
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), EmulationError> {
        // SAFETY: the display pointer is live for the lifetime of `self`.
        self.with_display(|d| unsafe {
            xlib::XFlush(d);
        })
    }
}
