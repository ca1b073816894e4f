use clap::Parser;

/// Initialise logging and parse the command line for a Frame Tunnel scenario binary.
///
/// `C` is usually a binary specific parser that flattens [crate::cli::FrameTunnelCli] together with
/// the options of the page binding it runs against.
pub fn init<C: Parser>() -> C {
    env_logger::init();

    C::parse()
}
