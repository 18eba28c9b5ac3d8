// imgconv/src/interactive.rs
use crate::core::{
    format_for_key, validate_dimensions, ConversionSettings, ConvertError, EncodeParams,
    InputError, OutputFormat, Result, FORMATS, MAX_DIMENSION,
};
use dialoguer::console::Term;
use dialoguer::Input;

pub type Validator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), InputError>;

pub fn parse_format_choice(input: &str) -> std::result::Result<OutputFormat, InputError> {
    let choice = input.trim();
    format_for_key(choice).ok_or_else(|| InputError::UnknownChoice(choice.to_string()))
}

pub fn parse_quality(input: &str) -> std::result::Result<u8, InputError> {
    let value = parse_integer(input)?;
    if !(1..=100).contains(&value) {
        return Err(InputError::OutOfRange {
            value,
            min: 1,
            max: 100,
        });
    }
    Ok(value as u8)
}

pub fn parse_dimension(input: &str) -> std::result::Result<u32, InputError> {
    let value = parse_integer(input)?;
    if value <= 0 {
        return Err(InputError::NotPositive(value));
    }
    if value > MAX_DIMENSION as i64 {
        return Err(InputError::OutOfRange {
            value,
            min: 1,
            max: MAX_DIMENSION as i64,
        });
    }
    Ok(value as u32)
}

/// Only a literal "y" (any case) counts as yes.
pub fn parse_yes_no(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

fn parse_integer(input: &str) -> std::result::Result<i64, InputError> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))
}

/// Where prompts are shown and answers read.
pub trait Prompter {
    fn show(&mut self, line: &str) -> Result<()>;

    /// Asks until `validate` accepts the answer, then returns it.
    fn ask(&mut self, prompt: &str, validate: Validator<'_>) -> Result<String>;
}

/// Terminal prompts via `dialoguer`.
pub struct TermPrompter {
    term: Term,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TermPrompter {
    fn show(&mut self, line: &str) -> Result<()> {
        self.term.write_line(line)?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str, validate: Validator<'_>) -> Result<String> {
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .validate_with(|input: &String| validate(input))
            .interact_text_on(&self.term)?;
        Ok(answer)
    }
}

pub struct SettingsCollector<P> {
    prompter: P,
}

impl<P: Prompter> SettingsCollector<P> {
    pub fn new(prompter: P) -> Self {
        Self { prompter }
    }

    pub fn collect(&mut self) -> Result<ConversionSettings> {
        self.prompter.show("\n=== Conversion settings ===")?;

        let format = self.ask_format()?;
        let mut params = format.default_params();
        if format.supports_quality() {
            let prompt = format!("{} quality (1-100)", format.name());
            let quality = self.ask_parsed(&prompt, parse_quality)?;
            params = EncodeParams::Jpeg { quality };
        }

        let width = self.ask_parsed("Maximum width (pixels)", parse_dimension)?;
        let height = self.ask_parsed("Maximum height (pixels)", |input| {
            let height = parse_dimension(input)?;
            validate_dimensions(width, height)?;
            Ok(height)
        })?;

        let keep_aspect = self.confirm("Keep aspect ratio? (y/n)")?;
        let auto_rotate = self.confirm("Automatically rotate portrait photos? (y/n)")?;

        let settings = ConversionSettings {
            format,
            params,
            width,
            height,
            keep_aspect,
            auto_rotate,
        };
        log::debug!("Collected settings: {:?}", settings);

        Ok(settings)
    }

    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.prompter.ask(prompt, &|_: &str| Ok(()))?;
        Ok(parse_yes_no(&answer))
    }

    fn ask_format(&mut self) -> Result<OutputFormat> {
        self.prompter.show("Choose the output format:")?;
        for entry in FORMATS.iter() {
            self.prompter.show(&format!(
                "{}. {} ({})",
                entry.key,
                entry.format.name(),
                entry.format.extension()
            ))?;
        }

        self.ask_parsed(
            &format!("Your choice (1-{})", FORMATS.len()),
            parse_format_choice,
        )
    }

    fn ask_parsed<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> std::result::Result<T, InputError>,
    ) -> Result<T> {
        let answer = self
            .prompter
            .ask(prompt, &|input: &str| parse(input).map(|_| ()))?;
        parse(&answer).map_err(|e| ConvertError::InvalidParameter(e.to_string()))
    }
}
