use crate::app::table::render_table;
use crate::core::aggregator::CorrelationMode;
use crate::core::report::StatisticsReport;
use crate::core::{Country, CountryStore, Field};
use crate::utils::error::{Result, StatsError};
use crate::utils::validation::{normalize_code, normalize_name, parse_percent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const MENU: &str = "\n\n1. View data table\n2. View statistics\n3. Add a country\n\
4. Edit a country\n5. Delete a country\n6. Quit\n\nChoose:  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewTable,
    ViewStatistics,
    Add,
    Edit,
    Delete,
    Quit,
}

impl MenuChoice {
    pub fn from_number(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(MenuChoice::ViewTable),
            2 => Some(MenuChoice::ViewStatistics),
            3 => Some(MenuChoice::Add),
            4 => Some(MenuChoice::Edit),
            5 => Some(MenuChoice::Delete),
            6 => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

/// Whether the menu loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

enum PercentAnswer {
    Skipped,
    Entered(Option<f64>),
}

fn is_yes(response: &str) -> bool {
    matches!(response.trim().to_ascii_uppercase().as_str(), "Y" | "YES")
}

/// The interactive menu over a country store.
///
/// Input and output are generic so sessions can be scripted in tests. End of
/// input anywhere in a session behaves like choosing Quit.
pub struct Prompter<R, W, S> {
    reader: R,
    writer: W,
    store: S,
    mode: CorrelationMode,
}

impl<R, W, S> Prompter<R, W, S>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
    S: CountryStore,
{
    pub fn new(reader: R, writer: W, store: S, mode: CorrelationMode) -> Self {
        Self {
            reader,
            writer,
            store,
            mode,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (W, S) {
        (self.writer, self.store)
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            let Some(line) = self.prompt(MENU).await? else {
                tracing::debug!("Input closed, leaving menu");
                return Ok(());
            };

            let Ok(number) = line.trim().parse::<u32>() else {
                self.say("\nYou are only allowed to pass in numerical values.\n")
                    .await?;
                continue;
            };
            let Some(choice) = MenuChoice::from_number(number) else {
                self.say("\nThe value you entered is not between the 1-6 range.\n")
                    .await?;
                continue;
            };

            tracing::debug!(?choice, "Menu choice");
            let outcome = match choice {
                MenuChoice::ViewTable => self.view_countries().await,
                MenuChoice::ViewStatistics => self.view_statistics().await,
                MenuChoice::Add => self.add_country().await,
                MenuChoice::Edit => self.update_country().await,
                MenuChoice::Delete => self.delete_country().await,
                MenuChoice::Quit => Ok(Flow::Exit),
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                // Stream failure; data-file writes surface as StorageError.
                Err(e @ StatsError::IoError(_)) => return Err(e),
                Err(e) => {
                    tracing::warn!(?choice, "Menu action failed: {}", e);
                    let message = format!(
                        "\n{}\n{}\n",
                        e.user_friendly_message(),
                        e.recovery_suggestion()
                    );
                    self.say(&message).await?;
                }
            }
        }
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        self.say(text).await?;
        let mut line = String::new();
        if self.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn prompt_code(&mut self, text: &str) -> Result<Option<String>> {
        loop {
            let Some(input) = self.prompt(text).await? else {
                return Ok(None);
            };
            match normalize_code(&input) {
                Ok(code) => return Ok(Some(code)),
                Err(e) => self.say(&format!("\n{}\n", e.user_friendly_message())).await?,
            }
        }
    }

    async fn prompt_percent(
        &mut self,
        field: Field,
        action: &str,
    ) -> Result<Option<PercentAnswer>> {
        let column = field.label();
        let question = format!(
            "\nDo you want to {} the value for the {} column ? (YES/any other value)  ",
            action, column
        );
        let Some(response) = self.prompt(&question).await? else {
            return Ok(None);
        };
        if !is_yes(&response) {
            return Ok(Some(PercentAnswer::Skipped));
        }

        let ask = format!(
            "\nEnter an {} value (must be a decimal value between 0 and 100):  ",
            column
        );
        let Some(input) = self.prompt(&ask).await? else {
            return Ok(None);
        };
        match parse_percent(column, &input) {
            Ok(value) => Ok(Some(PercentAnswer::Entered(Some(value)))),
            Err(e) => {
                let message = format!(
                    "\n{}\nIt is assumed that you didn't enter a value at all for the {} column.\n",
                    e.user_friendly_message(),
                    column
                );
                self.say(&message).await?;
                Ok(Some(PercentAnswer::Entered(None)))
            }
        }
    }

    async fn view_countries(&mut self) -> Result<Flow> {
        let countries = self.store.fetch_all().await?;
        let table = format!("\n{}", render_table(&countries));
        self.say(&table).await?;
        Ok(Flow::Continue)
    }

    async fn view_statistics(&mut self) -> Result<Flow> {
        let countries = self.store.fetch_all().await?;
        let report = StatisticsReport::compute(&countries, self.mode);
        let text = format!("\n{}", report.render_text());
        self.say(&text).await?;
        Ok(Flow::Continue)
    }

    async fn add_country(&mut self) -> Result<Flow> {
        loop {
            let Some(code) = self
                .prompt_code(
                    "\nEnter a country code (it must be of the form AZB, ROM and so on):  ",
                )
                .await?
            else {
                return Ok(Flow::Exit);
            };

            let Some(input) = self.prompt("\nEnter a country name:  ").await? else {
                return Ok(Flow::Exit);
            };
            let name = match normalize_name(&input) {
                Ok(name) => name,
                Err(e) => {
                    self.say(&format!("\n{}\n", e.user_friendly_message())).await?;
                    continue;
                }
            };

            let mut country = Country::new(code, name);
            for field in Field::ALL {
                match self.prompt_percent(field, "enter").await? {
                    None => return Ok(Flow::Exit),
                    Some(PercentAnswer::Skipped) => {}
                    Some(PercentAnswer::Entered(value)) => country.set(field, value),
                }
            }

            match self.store.add(country.clone()).await {
                Ok(()) => {
                    tracing::info!(code = %country.code, "Country added");
                    self.say(&format!("\nCountry {} added.\n", country.code)).await?;
                    return Ok(Flow::Continue);
                }
                Err(e @ StatsError::DuplicateCode { .. }) => {
                    self.say(&format!("\n{}\n", e.user_friendly_message())).await?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn update_country(&mut self) -> Result<Flow> {
        loop {
            let Some(code) = self
                .prompt_code(
                    "\nEnter the code of the country you want to edit (it must be of the form AZB, ROM and so on):  ",
                )
                .await?
            else {
                return Ok(Flow::Exit);
            };

            let mut country = match self.store.get_by_code(&code).await {
                Ok(country) => country,
                Err(StatsError::CountryNotFound { .. }) => {
                    self.say("\nThe country you tried to get is not in the database. Try again.\n")
                        .await?;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let Some(response) = self
                .prompt("\nDo you want to edit the country code ? (YES/any other value):  ")
                .await?
            else {
                return Ok(Flow::Exit);
            };
            if is_yes(&response) {
                let ask = format!("\nEnter a new code for country {}:  ", country.name);
                let Some(new_code) = self.prompt_code(&ask).await? else {
                    return Ok(Flow::Exit);
                };
                country.code = new_code;
            }

            let Some(response) = self
                .prompt("\nDo you want to edit the country name ? (YES/any other value):  ")
                .await?
            else {
                return Ok(Flow::Exit);
            };
            if is_yes(&response) {
                let ask = format!("\nEnter a new name for country {}:  ", country.name);
                let Some(input) = self.prompt(&ask).await? else {
                    return Ok(Flow::Exit);
                };
                match normalize_name(&input) {
                    Ok(name) => country.name = name,
                    Err(e) => {
                        self.say(&format!("\n{}\n", e.user_friendly_message())).await?;
                        continue;
                    }
                }
            }

            for field in Field::ALL {
                match self.prompt_percent(field, "edit").await? {
                    None => return Ok(Flow::Exit),
                    Some(PercentAnswer::Skipped) => {
                        let message = format!(
                            "\nThe {} value of {} is left unchanged.\n",
                            field.label(),
                            country.name
                        );
                        self.say(&message).await?;
                    }
                    Some(PercentAnswer::Entered(value)) => country.set(field, value),
                }
            }

            match self.store.update(&code, country.clone()).await {
                Ok(()) => {
                    tracing::info!(code = %code, new_code = %country.code, "Country updated");
                    self.say(&format!("\nCountry {} updated.\n", country.code)).await?;
                    return Ok(Flow::Continue);
                }
                Err(e @ StatsError::DuplicateCode { .. }) => {
                    self.say(&format!("\n{}\n", e.user_friendly_message())).await?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn delete_country(&mut self) -> Result<Flow> {
        loop {
            let Some(code) = self
                .prompt_code(
                    "\nEnter the code of the country you want to delete (it must be of the form AZB, ROM and so on):  ",
                )
                .await?
            else {
                return Ok(Flow::Exit);
            };

            match self.store.delete(&code).await {
                Ok(removed) => {
                    tracing::info!(code = %removed.code, "Country deleted");
                    self.say(&format!("\nCountry {} deleted.\n", removed.code)).await?;
                    return Ok(Flow::Continue);
                }
                Err(StatsError::CountryNotFound { .. }) => {
                    self.say("\nThe country you tried to get is not in the database. Try again.\n")
                        .await?;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
