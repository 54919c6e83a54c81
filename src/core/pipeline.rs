use crate::core::dedupe::LocationSet;
use crate::core::table::{seek_table, RowReader, TABLE_ID_ATTR, TABLE_ID_VALUE};
use crate::core::tokenizer::Tokenizer;
use crate::core::{ConfigProvider, OfficeRecord, Pipeline, RecordSink};
use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Query parameters of the legacy search form.
const FORM_TYPE_PARAM: &str = "formType";
const FORM_TYPE_VALUE: &str = "City";
const ZIP_PARAM: &str = "txtZip";
const CITY_PARAM: &str = "txtCity";

// a hung fetch must not hang the whole run
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches the listings page for each configured locality and feeds every
/// response through the extraction core. One locality is fetched, fully
/// parsed and deduplicated before the next one starts; each response body
/// is dropped after its own parse pass.
pub struct ScrapePipeline<S: RecordSink, C: ConfigProvider> {
    sink: S,
    config: C,
    client: Client,
}

impl<S: RecordSink, C: ConfigProvider> ScrapePipeline<S, C> {
    pub fn new(sink: S, config: C) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            sink,
            config,
            client,
        })
    }

    fn search_url(&self, locality: &str) -> Result<Url> {
        let param = if self.config.search_by_city() {
            CITY_PARAM
        } else {
            ZIP_PARAM
        };
        let url = Url::parse_with_params(
            self.config.endpoint(),
            [(FORM_TYPE_PARAM, FORM_TYPE_VALUE), (param, locality)],
        )?;
        Ok(url)
    }

    /// One parse pass over a fetched document: locate the listings table,
    /// walk its data rows, admit first occurrences. A page without the
    /// table contributes nothing; sink failures do propagate.
    fn scan_document(
        &mut self,
        body: &str,
        seen: &mut LocationSet,
        records: &mut Vec<OfficeRecord>,
    ) -> Result<()> {
        let mut tokens = Tokenizer::new(body);
        if !seek_table(&mut tokens, TABLE_ID_ATTR, TABLE_ID_VALUE) {
            tracing::warn!("no listings table in response, skipping");
            return Ok(());
        }
        let mut rows = RowReader::new(&mut tokens);
        while let Some(fields) = rows.next_data_row() {
            let Some(record) = OfficeRecord::from_fields(fields) else {
                continue;
            };
            if !seen.admit(record.location_key()) {
                continue;
            }
            if self.config.csv_output() {
                self.sink.accept(&record)?;
            }
            records.push(record);
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<S: RecordSink, C: ConfigProvider> Pipeline for ScrapePipeline<S, C> {
    /// Transport trouble is contained per locality: log, move on, never
    /// abort the batch.
    async fn run(&mut self) -> Result<Vec<OfficeRecord>> {
        let mut seen = LocationSet::new();
        let mut records = Vec::new();

        let localities: Vec<String> = self.config.localities().to_vec();
        for locality in &localities {
            let url = self.search_url(locality)?;
            tracing::debug!("fetching {}", url);
            let response = match self.client.get(url.clone()).send().await {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("fetch failed for {}: {}", locality, e);
                    continue;
                }
            };
            if !response.status().is_success() {
                tracing::warn!("{} answered {}", url, response.status());
                continue;
            }
            let body = match response.text().await {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!("could not read response for {}: {}", locality, e);
                    continue;
                }
            };
            let before = records.len();
            self.scan_document(&body, &mut seen, &mut records)?;
            tracing::info!("{}: {} new location(s)", locality, records.len() - before);
        }
        Ok(records)
    }
}
