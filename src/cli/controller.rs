//! Session Controller
//! The interactive prompt loop as an explicit state machine.
//!
//! ```text
//! ChooseScope --entire--> Dispatch(listing, no range)
//! ChooseScope --range---> EnterDates --valid--> ChooseOperation --> Dispatch
//! Dispatch --> Continue --y--> ChooseScope
//!                      --*--> Terminal
//! ```
//! Invalid answers re-enter the state that asked. End of input ends the session.

use super::prompt::Prompter;
use crate::charts::{ChartData, ChartDisplay};
use crate::config::AppConfig;
use crate::data::{DateBounds, DateRange, LoaderError, Table};
use crate::export::CsvExporter;
use crate::stats::{Operation, Report, ReportEngine};
use std::io::{self, BufRead, Write};

const SCOPE_PROMPT: &str =
    "Would you like to see the entire dataset or a specific date range? ('entire'/'range'): ";
const START_PROMPT: &str = "Enter start date (MM/DD/YYYY): ";
const END_PROMPT: &str = "Enter end date (MM/DD/YYYY): ";
const OPERATION_PROMPT: &str = "Choose an option: \n1. Show all data in selected date range \n2. Start to end date market difference \n3. Average start to end date market\n";
const CONTINUE_PROMPT: &str = "Would you like to perform another operation? (y/n): ";

const VISUAL_ENTIRE: &str = "Would you like to create a visual of the entire dataset? (y/n): ";
const VISUAL_RANGE: &str = "Would you like to create a visual of the selected data range? (y/n): ";
const VISUAL_AVERAGE: &str = "Would you like to create a visual of the average data? (y/n): ";
const VISUAL_FILTERED: &str = "Would you like to create a visual of the filtered data? (y/n): ";

/// What the user asked to be reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// `None` means the entire dataset
    pub range: Option<DateRange>,
    pub operation: Operation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    ChooseScope,
    EnterDates,
    ChooseOperation(DateRange),
    Dispatch(Selection),
    Continue,
    Terminal,
}

/// Names and titles used by a session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub banner: String,
    pub chart_title: String,
    pub all_data_file: String,
    pub range_data_file: String,
}

impl From<&AppConfig> for SessionSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            banner: config.session.banner.clone(),
            chart_title: config.chart.title.clone(),
            all_data_file: config.output.all_data_file.clone(),
            range_data_file: config.output.range_data_file.clone(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// One interactive session over a loaded dataset.
pub struct Session<'a, R, W, D> {
    table: &'a Table,
    bounds: DateBounds,
    prompter: Prompter<R, W>,
    display: D,
    exporter: CsvExporter,
    settings: SessionSettings,
}

impl<'a, R: BufRead, W: Write, D: ChartDisplay> Session<'a, R, W, D> {
    pub fn new(
        table: &'a Table,
        prompter: Prompter<R, W>,
        display: D,
        exporter: CsvExporter,
        settings: SessionSettings,
    ) -> Result<Self, LoaderError> {
        let bounds = table.bounds().ok_or(LoaderError::NoData)?;
        Ok(Self {
            table,
            bounds,
            prompter,
            display,
            exporter,
            settings,
        })
    }

    /// Run until the user declines to continue or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        let mut state = State::ChooseScope;
        while state != State::Terminal {
            state = self.step(state)?;
        }
        Ok(())
    }

    /// The single transition function.
    pub fn step(&mut self, state: State) -> io::Result<State> {
        log::trace!("state {:?}", state);
        match state {
            State::ChooseScope => self.choose_scope(),
            State::EnterDates => self.enter_dates(),
            State::ChooseOperation(range) => self.choose_operation(range),
            State::Dispatch(selection) => {
                self.dispatch(selection)?;
                Ok(State::Continue)
            }
            State::Continue => self.ask_continue(),
            State::Terminal => Ok(State::Terminal),
        }
    }

    fn choose_scope(&mut self) -> io::Result<State> {
        let question = format!("{}\n{}", self.settings.banner, SCOPE_PROMPT);
        let Some(answer) = self.prompter.ask(&question)? else {
            return Ok(State::Terminal);
        };

        match answer.trim().to_lowercase().as_str() {
            "entire" => Ok(State::Dispatch(Selection {
                range: None,
                operation: Operation::Listing,
            })),
            "range" => Ok(State::EnterDates),
            _ => {
                self.prompter
                    .say("Invalid choice. Please enter 'entire' or 'range'.")?;
                Ok(State::ChooseScope)
            }
        }
    }

    fn enter_dates(&mut self) -> io::Result<State> {
        let Some(start) = self.prompter.ask(START_PROMPT)? else {
            return Ok(State::Terminal);
        };
        let Some(end) = self.prompter.ask(END_PROMPT)? else {
            return Ok(State::Terminal);
        };

        match DateRange::parse(&start, &end, &self.bounds) {
            Ok(range) => Ok(State::ChooseOperation(range)),
            Err(e) => {
                log::debug!("rejected range '{}' - '{}': {:?}", start, end, e);
                self.prompter.say(e.to_string())?;
                Ok(State::EnterDates)
            }
        }
    }

    fn choose_operation(&mut self, range: DateRange) -> io::Result<State> {
        let Some(answer) = self.prompter.ask(OPERATION_PROMPT)? else {
            return Ok(State::Terminal);
        };

        match Operation::from_choice(&answer) {
            Some(operation) => Ok(State::Dispatch(Selection {
                range: Some(range),
                operation,
            })),
            None => {
                self.prompter
                    .say("Invalid option. Please select 1, 2, or 3.")?;
                Ok(State::ChooseOperation(range))
            }
        }
    }

    fn ask_continue(&mut self) -> io::Result<State> {
        if self.prompter.confirm(CONTINUE_PROMPT)? {
            Ok(State::ChooseScope)
        } else {
            self.prompter.say("Exiting the program.")?;
            Ok(State::Terminal)
        }
    }

    fn dispatch(&mut self, selection: Selection) -> io::Result<()> {
        let title = self.settings.chart_title.clone();

        let Some(range) = selection.range else {
            let table = self.table;
            self.exporter
                .save(table, &self.settings.all_data_file, self.prompter.output());
            return self.offer_chart(VISUAL_ENTIRE, || ChartData::from_table(&title, table));
        };

        let filtered = match range.apply(self.table) {
            Ok(filtered) => filtered,
            Err(e) => return self.prompter.say(format!("Error: {}", e)),
        };
        log::info!(
            "{:?} over {} ({} rows)",
            selection.operation,
            range,
            filtered.len()
        );

        let report = match ReportEngine::run(selection.operation, &filtered) {
            Ok(report) => report,
            Err(e) => return self.prompter.say(format!("Error: {}", e)),
        };

        match report {
            Report::Listing(listing) => {
                self.exporter
                    .save(&listing, &self.settings.range_data_file, self.prompter.output());
                return self.offer_chart(VISUAL_RANGE, || ChartData::from_table(&title, &listing));
            }
            Report::Summary(summary) => {
                self.prompter.say(summary.to_string())?;
                if selection.operation == Operation::Average {
                    self.offer_chart(VISUAL_AVERAGE, || ChartData::from_summary(&title, &summary))?;
                }
            }
        }

        // Asked after difference and average alike, even if a chart was just shown.
        self.offer_chart(VISUAL_FILTERED, || ChartData::from_table(&title, &filtered))
    }

    /// Ask a y/n question and show the chart on "y". A window failure is
    /// reported and the session carries on.
    fn offer_chart(&mut self, question: &str, build: impl FnOnce() -> ChartData) -> io::Result<()> {
        if !self.prompter.confirm(question)? {
            return Ok(());
        }

        let chart = build();
        if let Err(e) = self.display.show(&chart) {
            log::warn!("chart display failed: {:#}", e);
            self.prompter.say(format!("Failed to display chart: {}", e))?;
        }
        Ok(())
    }
}
