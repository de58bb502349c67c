use crate::cli::parser::Commands;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        if *print_config {
            ConfigLogic::print()?;
        }

        if *edit_config {
            ConfigLogic::edit(editor)?;
        }

        if !*print_config && !*edit_config {
            info("Nothing to do: use --print or --edit.");
        }
    }

    Ok(())
}
