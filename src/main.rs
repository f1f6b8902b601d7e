use clap::Parser;
use miette::Result;
use lss::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    lss::cli::logging::init(&global);

    match cli.command {
        Commands::Init(args) => lss::cli::commands::init::run(args),
        Commands::Render(args) => lss::cli::commands::render::run(args, &global),
        Commands::Validate(args) => lss::cli::commands::validate::run(args, &global),
        Commands::Location(cmd) => lss::cli::commands::location::run(cmd, &global),
        Commands::Types(args) => lss::cli::commands::types::run(args, &global),
        Commands::Completions(args) => lss::cli::commands::completions::run(args),
    }
}
