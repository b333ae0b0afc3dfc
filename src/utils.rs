use std::sync::Once;

pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    //
    // For more details see
    // https://github.com/rustwasm/console_error_panic_hook#readme
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

static LOGGING: Once = Once::new();

// Routes `tracing` events to the browser console. Only one global subscriber
// may ever be installed, so repeat calls are ignored.
pub fn init_logging() {
    LOGGING.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        tracing_wasm::set_as_global_default();
    });
}
