mod cli;
mod config;
mod delete_cmd;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    match cli::parse_args(&args)? {
        cli::Command::Help => {
            cli::print_help();
            Ok(())
        }
        cli::Command::Delete(args) => delete_cmd::run(args),
    }
}
