use super::types::{Config, FileSettings, LlmSettings, LoggingSettings, OutputSettings};

#[derive(Debug)]
pub struct ConfigBuilder {
    pub(super) llm: LlmSettings,
    pub(super) files: FileSettings,
    pub(super) output: OutputSettings,
    pub(super) logging: LoggingSettings,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            llm: LlmSettings::default(),
            files: FileSettings::default(),
            output: OutputSettings::default(),
            logging: LoggingSettings::default(),
        }
    }

    pub fn with_llm<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut LlmSettings),
    {
        update(&mut self.llm);
        self
    }

    pub fn with_files<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut FileSettings),
    {
        update(&mut self.files);
        self
    }

    pub fn with_output<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut OutputSettings),
    {
        update(&mut self.output);
        self
    }

    pub fn with_logging<F>(mut self, update: F) -> Self
    where
        F: FnOnce(&mut LoggingSettings),
    {
        update(&mut self.logging);
        self
    }

    pub fn build(self) -> Config {
        Config {
            llm: self.llm,
            files: self.files,
            output: self.output,
            logging: self.logging,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
