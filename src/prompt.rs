//! User prompts
//!
//! Asking the user to retry or cancel is the only point where resolution blocks. It is an
//! injected capability so hosts can show their own dialog and tests can script answers.

use dialoguer::Select;
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use tracing::warn;

/// Choices a prompt can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOption {
    Retry,
    Cancel,
    Ok,
}

impl PromptOption {
    pub fn label(self) -> &'static str {
        match self {
            PromptOption::Retry => "Retry",
            PromptOption::Cancel => "Cancel",
            PromptOption::Ok => "OK",
        }
    }

    /// Answer used when no real answer can be obtained: cancel if possible.
    pub fn fallback(options: &[PromptOption]) -> PromptOption {
        if options.contains(&PromptOption::Cancel) {
            PromptOption::Cancel
        } else {
            options.first().copied().unwrap_or(PromptOption::Cancel)
        }
    }
}

impl fmt::Display for PromptOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Title and description shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub title: String,
    pub description: String,
}

impl Diagnostic {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl From<&crate::error::ResolutionError> for Diagnostic {
    fn from(err: &crate::error::ResolutionError) -> Self {
        Diagnostic::new(err.title(), err.to_string())
    }
}

/// Blocking question to the user.
pub trait UserPrompt {
    /// Show the diagnostic and wait for one of `options`.
    fn ask(&self, diagnostic: &Diagnostic, options: &[PromptOption]) -> PromptOption;
}

impl<T: UserPrompt + ?Sized> UserPrompt for &T {
    fn ask(&self, diagnostic: &Diagnostic, options: &[PromptOption]) -> PromptOption {
        (**self).ask(diagnostic, options)
    }
}

impl<T: UserPrompt + ?Sized> UserPrompt for Box<T> {
    fn ask(&self, diagnostic: &Diagnostic, options: &[PromptOption]) -> PromptOption {
        (**self).ask(diagnostic, options)
    }
}

fn print_diagnostic(diagnostic: &Diagnostic) {
    eprintln!();
    eprintln!("{}", diagnostic.title.bold().yellow());
    eprintln!("{}", diagnostic.description);
}

/// Terminal prompt using `dialoguer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompt;

impl UserPrompt for DialoguerPrompt {
    fn ask(&self, diagnostic: &Diagnostic, options: &[PromptOption]) -> PromptOption {
        print_diagnostic(diagnostic);

        let labels: Vec<&str> = options.iter().map(|o| o.label()).collect();
        match Select::new()
            .with_prompt(diagnostic.title.as_str())
            .items(&labels)
            .default(0)
            .interact_opt()
        {
            Ok(Some(index)) => options[index],
            Ok(None) => PromptOption::fallback(options),
            Err(e) => {
                warn!(error = %e, "Prompt failed, using fallback answer");
                PromptOption::fallback(options)
            }
        }
    }
}

/// Prompt for unattended runs: reports the diagnostic and never retries.
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractivePrompt;

impl UserPrompt for NonInteractivePrompt {
    fn ask(&self, diagnostic: &Diagnostic, options: &[PromptOption]) -> PromptOption {
        print_diagnostic(diagnostic);
        PromptOption::fallback(options)
    }
}

type AskHook = Box<dyn Fn(&Diagnostic) + Send + Sync>;

/// Prompt that replays a fixed list of answers.
///
/// Every diagnostic asked is recorded. The optional hook runs before each answer, which
/// lets a caller change the environment the way a user would between retries.
#[derive(Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<PromptOption>>,
    asked: Mutex<Vec<Diagnostic>>,
    hook: Option<AskHook>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = PromptOption>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
            hook: None,
        }
    }

    pub fn on_ask(mut self, hook: impl Fn(&Diagnostic) + Send + Sync + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Diagnostics shown so far, oldest first.
    pub fn asked(&self) -> Vec<Diagnostic> {
        self.asked.lock().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().len()
    }
}

impl fmt::Debug for ScriptedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedPrompt")
            .field("answers", &*self.answers.lock())
            .field("asked", &*self.asked.lock())
            .finish()
    }
}

impl UserPrompt for ScriptedPrompt {
    fn ask(&self, diagnostic: &Diagnostic, options: &[PromptOption]) -> PromptOption {
        self.asked.lock().push(diagnostic.clone());
        if let Some(hook) = &self.hook {
            hook(diagnostic);
        }
        match self.answers.lock().pop_front() {
            Some(answer) if options.contains(&answer) => answer,
            _ => PromptOption::fallback(options),
        }
    }
}
