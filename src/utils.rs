use web_sys::console;

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// Logs the time between creation and drop under `name` in the browser console
#[cfg(feature = "frame-timing")]
pub struct Timer<'a> {
    name: &'a str,
}

#[cfg(feature = "frame-timing")]
impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

#[cfg(feature = "frame-timing")]
impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}

pub fn warn(message: &str) {
    console::warn_1(&message.into());
}
