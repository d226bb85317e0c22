use crate::{
    cli::{answers::load_prefilled_answers, answers::AnswerCollector, Args},
    codec,
    error::Result,
    ioutils::{get_output_path, read_file, write_file},
    prompt::{
        automatic::AutomaticPrompter, derive_prompts, dialoguer::DialoguerPrompter,
        reconstitute, PromptProvider,
    },
};
use std::path::PathBuf;

/// Main CLI runner that orchestrates parameters file generation
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Runs with the provider selected by `--non-interactive`.
    pub fn run(self) -> Result<()> {
        if self.args.non_interactive {
            self.run_with(AutomaticPrompter::new())
        } else {
            self.run_with(DialoguerPrompter::new())
        }
    }

    /// Executes the complete generation workflow with the given prompt provider
    pub fn run_with<P: PromptProvider>(self, provider: P) -> Result<()> {
        let output = self.output_path()?;

        log::debug!("Reading parameters template '{}'.", self.args.template.display());
        let template = codec::parse(&read_file(&self.args.template)?)?;

        let prefilled = load_prefilled_answers(self.args.answers.clone())?;
        let collector = AnswerCollector::new(provider);

        let known = collector.known_settings(self.args.engine.clone(), &prefilled)?;
        let prompts = derive_prompts(&template, &known)?;
        log::info!("Derived {} prompts from the template.", prompts.len());

        let answers = collector.collect_answers(&prompts, &prefilled)?;
        let config = reconstitute(&template, &known, &answers)?;
        let document = codec::serialize(&config)?;

        println!("{document}");

        if self.args.dry_run {
            log::info!("[DRY RUN] Would write '{}'.", output.display());
            return Ok(());
        }

        write_file(&document, &output)?;
        println!("Parameters written to {}.", output.display());
        Ok(())
    }

    fn output_path(&self) -> Result<PathBuf> {
        // Dry runs never write, so an existing output is no obstacle.
        let force = self.args.force || self.args.dry_run;
        get_output_path(&self.args.template, self.args.output.as_deref(), force)
    }
}

/// Runs paramgen with the parsed command line arguments
pub fn run(args: Args) -> Result<()> {
    Runner::new(args).run()
}
