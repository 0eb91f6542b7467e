//! Concurrent enrichment of descriptor records
//!
//! Each record with an accepted `git` link becomes one task that lists the
//! remote's refs and fetches provider metadata concurrently, then merges both
//! into the record. Tasks are bounded by a semaphore, started with a small
//! stagger, and each runs under a fixed budget. A failed, timed-out or
//! cancelled task leaves its record untouched and yields a [`Diagnostic`];
//! it never aborts the batch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::{Semaphore, watch};
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::config::{Credential, FetchConfig, IndexerConfig};
use crate::descriptor::host::{GitHost, shorten_git_link};
use crate::descriptor::types::PackageRecord;
use crate::index::error::EnrichError;
use crate::metadata::error::MetadataError;
use crate::metadata::github::GitHubProvider;
use crate::metadata::merger::merge_record;
use crate::metadata::provider::{MetadataProvider, ProviderMetadata};
use crate::version::lister::{GitRefLister, RefLister};
use crate::version::refs::parse_remote_refs;

/// Scheduling limits for one aggregation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Maximum number of packages enriched at once
    pub concurrency: usize,
    /// Budget for enriching one package, both remote calls included
    pub task_timeout: Duration,
    /// Delay between consecutive task starts
    pub stagger_delay: Duration,
}

impl From<&FetchConfig> for AggregateOptions {
    fn from(config: &FetchConfig) -> Self {
        Self {
            concurrency: config.concurrency,
            task_timeout: config.task_timeout(),
            stagger_delay: config.stagger_delay(),
        }
    }
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self::from(&FetchConfig::default())
    }
}

/// A package that could not be enriched
#[derive(Debug)]
pub struct Diagnostic {
    pub package: String,
    pub git: String,
    pub error: EnrichError,
}

/// Output of an aggregation run
#[derive(Debug, Default)]
pub struct AggregateReport {
    /// One record per input record, in input order
    pub records: Vec<PackageRecord>,
    /// One entry per package left unenriched
    pub diagnostics: Vec<Diagnostic>,
}

/// Fans enrichment out across all packages
pub struct Aggregator {
    lister: Arc<dyn RefLister>,
    providers: HashMap<GitHost, Arc<dyn MetadataProvider>>,
    options: AggregateOptions,
}

impl Aggregator {
    /// Build an Aggregator with custom lister and providers.
    ///
    /// At most one provider is kept per host; records on hosts without a
    /// provider are merged with empty metadata.
    pub fn new(
        lister: Arc<dyn RefLister>,
        providers: Vec<Arc<dyn MetadataProvider>>,
        options: AggregateOptions,
    ) -> Self {
        let providers = providers
            .into_iter()
            .map(|provider| (provider.host(), provider))
            .collect();

        Self {
            lister,
            providers,
            options: AggregateOptions {
                concurrency: options.concurrency.max(1),
                ..options
            },
        }
    }

    /// Build the default Aggregator: the git CLI lister plus a GitHub
    /// provider authenticated with `credential` (unless disabled).
    pub fn from_config(
        config: &IndexerConfig,
        credential: Credential,
    ) -> Result<Self, MetadataError> {
        let mut providers: Vec<Arc<dyn MetadataProvider>> = Vec::new();
        if config.github.enabled {
            providers.push(Arc::new(GitHubProvider::new(
                &config.github.api_base_url,
                credential,
                config.fetch.provider_timeout(),
            )?));
        }

        Ok(Self::new(
            Arc::new(GitRefLister::default()),
            providers,
            AggregateOptions::from(&config.fetch),
        ))
    }

    /// Enrich all records. See [`Aggregator::aggregate_with_cancel`].
    pub async fn aggregate(&self, records: Vec<PackageRecord>) -> AggregateReport {
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        self.aggregate_with_cancel(records, cancel_rx).await
    }

    /// Enrich all records, abandoning unfinished packages once `cancel`
    /// turns true.
    ///
    /// Returns after every task has finished. The output holds exactly one
    /// record per input, at the same position.
    pub async fn aggregate_with_cancel(
        &self,
        records: Vec<PackageRecord>,
        cancel: watch::Receiver<bool>,
    ) -> AggregateReport {
        let semaphore = Arc::new(Semaphore::new(self.options.concurrency));

        // Staggering counts only records that reach a remote
        let mut remote_ordinal = 0usize;
        let handles: Vec<_> = records
            .iter()
            .map(|record| {
                let host = GitHost::detect(&record.git);
                let ordinal = remote_ordinal;
                if host.is_some() {
                    remote_ordinal += 1;
                }
                let task = PackageTask {
                    lister: Arc::clone(&self.lister),
                    provider: host.and_then(|host| self.providers.get(&host).cloned()),
                    semaphore: Arc::clone(&semaphore),
                    options: self.options,
                    cancel: cancel.clone(),
                };
                let record = record.clone();
                tokio::spawn(task.run(ordinal, record))
            })
            .collect();

        let outcomes = join_all(handles).await;

        let mut report = AggregateReport::default();
        for (original, outcome) in records.into_iter().zip(outcomes) {
            match outcome.unwrap_or_else(|e| Err(EnrichError::TaskFailed(e.to_string()))) {
                Ok(record) => report.records.push(record),
                Err(error) => {
                    let host = GitHost::detect(&original.git)
                        .map_or("unknown", |host| host.as_str());
                    warn!(
                        "Failed to enrich {} from {} ({}): {}",
                        original.name, host, original.git, error
                    );
                    report.diagnostics.push(Diagnostic {
                        package: original.name.clone(),
                        git: original.git.clone(),
                        error,
                    });
                    report.records.push(original);
                }
            }
        }

        info!(
            "Aggregated {} packages ({} failed)",
            report.records.len(),
            report.diagnostics.len()
        );

        report
    }
}

/// Everything one package task owns
struct PackageTask {
    lister: Arc<dyn RefLister>,
    provider: Option<Arc<dyn MetadataProvider>>,
    semaphore: Arc<Semaphore>,
    options: AggregateOptions,
    cancel: watch::Receiver<bool>,
}

impl PackageTask {
    async fn run(self, ordinal: usize, record: PackageRecord) -> Result<PackageRecord, EnrichError> {
        if GitHost::detect(&record.git).is_none() {
            debug!("No remote for {}, passing through", record.name);
            return Ok(record);
        }

        let PackageTask {
            lister,
            provider,
            semaphore,
            options,
            cancel,
        } = self;

        let work = async {
            let start_delay = options
                .stagger_delay
                .saturating_mul(u32::try_from(ordinal).unwrap_or(u32::MAX));
            sleep(start_delay).await;

            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => return Err(EnrichError::TaskFailed(e.to_string())),
            };

            match timeout(
                options.task_timeout,
                enrich(lister.as_ref(), provider.as_deref(), &record),
            )
            .await
            {
                Ok(result) => result,
                Err(_) => Err(EnrichError::Timeout(options.task_timeout)),
            }
        };

        tokio::select! {
            biased;
            _ = cancelled(cancel) => Err(EnrichError::Cancelled),
            result = work => result,
        }
    }
}

/// List refs and fetch metadata concurrently, then merge both into `record`.
async fn enrich(
    lister: &dyn RefLister,
    provider: Option<&dyn MetadataProvider>,
    record: &PackageRecord,
) -> Result<PackageRecord, EnrichError> {
    let short_path = shorten_git_link(&record.git);

    let list_versions = async {
        let output = lister.list_refs(&record.git).await?;
        Ok::<_, EnrichError>(parse_remote_refs(&output))
    };

    let fetch_metadata = async {
        match provider {
            Some(provider) => Ok::<_, EnrichError>(provider.fetch_metadata(&short_path).await?),
            None => Ok(ProviderMetadata::default()),
        }
    };

    let (versions, meta) = tokio::try_join!(list_versions, fetch_metadata)?;

    info!("Enriched {} with {} versions", record.name, versions.len());
    Ok(merge_record(record.clone(), versions, &meta))
}

/// Resolves once `cancel` turns true; never resolves if the sender is gone.
async fn cancelled(mut cancel: watch::Receiver<bool>) {
    if cancel.wait_for(|cancelled| *cancelled).await.is_err() {
        std::future::pending::<()>().await;
    }
}
