use std::panic::PanicHookInfo;

/// Panic hook that prints roughly the same message as the default panic hook
/// but uses tracing:error instead of stderr, then terminates the process with
/// `exit_code`.
///
/// A panic in a spawned task would otherwise only abort that task, and a panic
/// on the main task exits with the runtime's own code.
pub fn install_exiting(exit_code: i32) {
    std::panic::set_hook(Box::new(move |panic| {
        tracing_panic_hook(panic);
        std::process::exit(exit_code);
    }));
}

fn tracing_panic_hook(panic: &PanicHookInfo) {
    let thread = std::thread::current();
    let name = thread.name().unwrap_or("<unnamed>");
    let backtrace = std::backtrace::Backtrace::force_capture();
    tracing::error!("thread '{name}' {panic}\nstack backtrace:\n{backtrace}");
}
