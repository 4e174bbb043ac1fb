// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(bin_name = "kmc")]
#[command(about = "⌨️ Record, replay and step edit Emacs style keyboard macros")]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(true))]
/// More info: <https://docs.rs/clap/latest/clap/struct.Command.html#method.help_template>
#[command(
    help_template = "{about}\nVersion: {bin} {version} 💻\n\nUSAGE 📓:\n  kmc [\x1b[32mCommand\x1b[0m] [\x1b[34mOptions\x1b[0m]\n\n{all-args}\n",
    subcommand_help_heading("Command")
)]
/// More info:
/// - <https://docs.rs/clap/latest/clap/_derive/#overview>
pub struct CLIArg {
    #[command(subcommand)]
    pub command: CLICommand,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        short = 'l',
        help = "Log app output to a file named `kmacro_log.txt` for debugging"
    )]
    pub enable_logging: bool,

    #[arg(
        global = true,
        long,
        value_name = "file",
        help = "Read the config from this JSON file, instead of the one in the config folder"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CLICommand {
    #[clap(
        about = "▶️ Type keys into a text buffer, with keyboard macros enabled\n💡 Eg: `kmc play --keys \"C-x ( a b C-x ) C-x e\"`"
    )]
    Play {
        #[arg(
            long,
            short = 'k',
            value_name = "keys",
            help = "The keys to type, as an Emacs key description"
        )]
        keys: String,

        #[arg(
            long,
            short = 't',
            value_name = "text",
            default_value = "",
            help = "Initial content of the buffer, the cursor starts at the end"
        )]
        text: String,

        #[arg(
            long,
            short = 'r',
            value_name = "file",
            help = "Load the macro ring from this JSON file before typing"
        )]
        ring_file: Option<PathBuf>,

        #[arg(
            long,
            short = 's',
            requires = "ring_file",
            help = "Save the macro ring back to the ring file when done"
        )]
        save: bool,
    },

    #[clap(about = "📜 Show the macro ring and the named macros in a ring file")]
    Describe {
        #[arg(value_name = "file", help = "The JSON ring file to describe")]
        ring_file: PathBuf,
    },

    #[clap(
        about = "🪜 Step through the head of the macro ring, answering each query with the given keys\n💡 Eg: `kmc step-edit ring.json --responses \"SPC n SPC\" --save`"
    )]
    StepEdit {
        #[arg(value_name = "file", help = "The JSON ring file holding the macro to edit")]
        ring_file: PathBuf,

        #[arg(
            long,
            short = 'k',
            value_name = "keys",
            help = "Responses (and inserted keys) to feed the step editor, as an Emacs key description"
        )]
        responses: String,

        #[arg(
            long,
            short = 't',
            value_name = "text",
            default_value = "",
            help = "Initial content of the buffer the macro runs against"
        )]
        text: String,

        #[arg(
            long,
            short = 's',
            help = "Save the macro ring back to the ring file when done"
        )]
        save: bool,
    },
}
