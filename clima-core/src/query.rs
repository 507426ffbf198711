use thiserror::Error;

use crate::model::{QueryInput, WeatherRecord};
use crate::store::{DocumentStore, FieldFilter};

/// The three user-visible failure modes of a lookup attempt. All are
/// terminal for the attempt; none are retried.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Date or time missing; the store is never contacted.
    #[error("Data e hora são obrigatórias!")]
    MissingInput,

    /// The store answered with zero matching documents.
    #[error("Dados não encontrados!")]
    NotFound,

    /// The store call itself failed; the underlying message is surfaced.
    #[error("Erro ao buscar dados: {0}")]
    Store(String),
}

/// Presentation state of the lookup screen. Exactly one variant holds at
/// a time; each submit replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryState {
    #[default]
    Idle,
    Error(String),
    Results(Vec<WeatherRecord>),
}

/// Controller for the lookup form: owns the injected store and the
/// current [`QueryState`].
#[derive(Debug)]
pub struct QueryForm {
    store: Box<dyn DocumentStore>,
    collection: String,
    state: QueryState,
}

impl QueryForm {
    pub fn new(store: Box<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
            state: QueryState::Idle,
        }
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    /// Validate the input, issue at most one filtered read, and replace
    /// the state with the outcome.
    pub async fn submit(&mut self, input: &QueryInput) -> &QueryState {
        self.state = match self.run_query(input).await {
            Ok(records) => QueryState::Results(records),
            Err(err) => QueryState::Error(err.to_string()),
        };

        &self.state
    }

    async fn run_query(&self, input: &QueryInput) -> Result<Vec<WeatherRecord>, QueryError> {
        if !input.is_complete() {
            return Err(QueryError::MissingInput);
        }

        let filters = [
            FieldFilter::equals("date", &input.date),
            FieldFilter::equals("time", &input.time),
        ];

        let documents = self
            .store
            .query(&self.collection, &filters)
            .await
            .map_err(|err| QueryError::Store(format!("{err:#}")))?;

        if documents.is_empty() {
            return Err(QueryError::NotFound);
        }

        let records = documents
            .iter()
            .map(|doc| WeatherRecord {
                temperature: doc.get_double("temperature").unwrap_or(0.0),
                humidity: doc.get_double("humidity").unwrap_or(0.0),
            })
            .collect();

        Ok(records)
    }
}
