use tsuru_client::cli;
use tsuru_client::plugin::PluginError;

fn main() {
    if let Err(err) = cli::run() {
        // A plugin that ran and exited non-zero is not a client error;
        // mirror the child's exit status instead of reporting one.
        if let Some(PluginError::NonZeroExit(code)) = err.downcast_ref::<PluginError>() {
            std::process::exit(*code);
        }
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
