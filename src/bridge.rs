//! Host bridge: the mini-app container the game runs inside.
//!
//! The engine only needs three things from it (a ready call, the player's
//! display name, haptic feedback) and treats all of them as best-effort.

/// Haptic feedback styles the host understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HapticStyle {
    Light,
    Medium,
    Heavy,
    Rigid,
    Soft,
    Error,
    Success,
    Warning,
}

impl HapticStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            HapticStyle::Light => "light",
            HapticStyle::Medium => "medium",
            HapticStyle::Heavy => "heavy",
            HapticStyle::Rigid => "rigid",
            HapticStyle::Soft => "soft",
            HapticStyle::Error => "error",
            HapticStyle::Success => "success",
            HapticStyle::Warning => "warning",
        }
    }

    /// Error/success/warning are notifications; the rest are impacts.
    pub fn is_notification(self) -> bool {
        matches!(
            self,
            HapticStyle::Error | HapticStyle::Success | HapticStyle::Warning
        )
    }
}

/// Every call is infallible from the caller's side. Implementations swallow
/// their own failures.
pub trait HostBridge {
    fn ready(&self);
    fn display_name(&self) -> Option<String>;
    fn notify(&self, style: HapticStyle);
}

/// Used when no host is present (desktop, tests).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopBridge;

impl HostBridge for NoopBridge {
    fn ready(&self) {}

    fn display_name(&self) -> Option<String> {
        None
    }

    fn notify(&self, _style: HapticStyle) {}
}

#[cfg(target_arch = "wasm32")]
pub use telegram::TelegramBridge;

#[cfg(target_arch = "wasm32")]
mod telegram {
    use js_sys::{Function, Reflect};
    use wasm_bindgen::{JsCast, JsValue};

    use super::{HapticStyle, HostBridge};

    /// `window.Telegram.WebApp`, looked up on every call so a late-loading
    /// script is still picked up.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct TelegramBridge;

    fn get(target: &JsValue, key: &str) -> Option<JsValue> {
        Reflect::get(target, &JsValue::from_str(key))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
    }

    fn web_app() -> Option<JsValue> {
        let telegram = get(&js_sys::global().into(), "Telegram")?;
        get(&telegram, "WebApp")
    }

    fn call(target: &JsValue, method: &str, args: &[JsValue]) {
        let Some(func) = get(target, method).and_then(|f| f.dyn_into::<Function>().ok()) else {
            tracing::warn!(method, "host bridge method is missing");
            return;
        };
        let result = match args {
            [] => func.call0(target),
            [a] => func.call1(target, a),
            _ => func.apply(target, &args.iter().collect()),
        };
        if let Err(e) = result {
            tracing::warn!(method, error = ?e, "host bridge call failed");
        }
    }

    impl HostBridge for TelegramBridge {
        fn ready(&self) {
            if let Some(app) = web_app() {
                call(&app, "ready", &[]);
            }
        }

        fn display_name(&self) -> Option<String> {
            let user = get(&get(&web_app()?, "initDataUnsafe")?, "user")?;
            get(&user, "first_name")?.as_string()
        }

        fn notify(&self, style: HapticStyle) {
            let Some(haptics) = web_app().and_then(|app| get(&app, "HapticFeedback")) else {
                return;
            };
            let method = if style.is_notification() {
                "notificationOccurred"
            } else {
                "impactOccurred"
            };
            call(&haptics, method, &[JsValue::from_str(style.as_str())]);
        }
    }
}
