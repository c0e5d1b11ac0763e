use crate::config::{BuildConfig, SiteConfig};
use crate::error::{Error, Result};
use crate::filter::PathFilter;
use crate::parsers::Extractor;
use crate::results::{FileRecord, PageRecord, Record, SiteRecord};
use crate::utils::{read_file_safe, site_path};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinHandle, JoinSet};

const CHANNEL_CAPACITY: usize = 1000;

/// Root-level files copied verbatim into the manifest
const ROOT_FILES: [(&str, fn(FileRecord) -> Record); 2] = [
    ("robots.txt", Record::Robots),
    ("sitemap.xml", Record::Sitemap),
];

/// How a finished build went: pages handed to the receiver and tasks that failed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildOutcome {
    pub pages: usize,
    pub failed: usize,
}

impl BuildOutcome {
    /// Fails when any page (or the discovery walk) did not make it into the manifest
    pub fn check(self) -> Result<usize> {
        if self.failed > 0 {
            return Err(Error::PagesFailed {
                failed: self.failed,
                total: self.pages + self.failed,
            });
        }
        Ok(self.pages)
    }
}

/// Records of a running build plus the handle that reports how it ended
pub struct BuildStream {
    pub records: mpsc::Receiver<Record>,
    pub finished: JoinHandle<BuildOutcome>,
}

enum PageOutcome {
    Sent,
    Dropped,
    Failed,
}

/// Starts walking a site directory and returns a stream of manifest records.
///
/// The `site` record comes first, followed by `robotsTxt` and `sitemapXml` when
/// those files exist and are non-empty, then one `page` record per HTML file.
/// Pages are extracted concurrently, so their order is only stable when
/// `max_concurrency` is 1. Await `finished` after draining `records` to learn
/// whether any page was lost.
///
/// # Arguments
///
/// * `config` - Build configuration
pub async fn start(config: &BuildConfig) -> Result<BuildStream> {
    let root = config.root_dir.clone();
    if !root.is_dir() {
        return Err(Error::RootNotDirectory(root));
    }

    let site = config.site.clone().normalized()?;
    let filter = PathFilter::new(&config.extensions, &config.exclude_patterns)?;
    let extractor = Arc::new(
        Extractor::new(&site.domain).with_content_html(config.include_content_html),
    );

    ::log::info!(
        "Starting manifest build for {} (domain {})",
        root.display(),
        site.domain
    );

    let (tx, rx) = mpsc::channel::<Record>(CHANNEL_CAPACITY);
    let max_concurrency = config.max_concurrency.max(1);

    let finished = tokio::spawn(produce(root, site, filter, extractor, max_concurrency, tx));

    Ok(BuildStream {
        records: rx,
        finished,
    })
}

/// Sends the preamble records, then extracts every page under the semaphore
async fn produce(
    root: PathBuf,
    site: SiteConfig,
    filter: PathFilter,
    extractor: Arc<Extractor>,
    max_concurrency: usize,
    tx: mpsc::Sender<Record>,
) -> BuildOutcome {
    for record in preamble(&root, &site) {
        if tx.send(record).await.is_err() {
            ::log::warn!("Manifest receiver dropped before the preamble was sent");
            return BuildOutcome::default();
        }
    }

    let walk_root = root.clone();
    let files = match tokio::task::spawn_blocking(move || discover_pages(&walk_root, &filter))
        .await
    {
        Ok(files) => files,
        Err(e) => {
            ::log::error!("Page discovery failed: {}", e);
            return BuildOutcome {
                pages: 0,
                failed: 1,
            };
        }
    };
    ::log::info!("Discovered {} pages under {}", files.len(), root.display());

    let semaphore = Arc::new(Semaphore::new(max_concurrency));
    let mut tasks = JoinSet::new();

    for file in files {
        let permit = match Arc::clone(&semaphore).acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => break,
        };
        let root = root.clone();
        let extractor = Arc::clone(&extractor);
        let tx = tx.clone();

        tasks.spawn(async move {
            let page =
                tokio::task::spawn_blocking(move || build_page(&root, &file, &extractor)).await;
            let outcome = match page {
                Ok(page) => {
                    if tx.send(Record::Page(Box::new(page))).await.is_err() {
                        ::log::debug!("Manifest receiver dropped, discarding page");
                        PageOutcome::Dropped
                    } else {
                        PageOutcome::Sent
                    }
                }
                Err(e) => {
                    ::log::error!("Page extraction task failed: {}", e);
                    PageOutcome::Failed
                }
            };
            drop(permit);
            outcome
        });
    }

    let outcome = join_pages(tasks).await;
    ::log::info!(
        "Finished page tasks: {} sent, {} failed",
        outcome.pages,
        outcome.failed
    );
    outcome
}

/// Waits for every page task and tallies what happened to its page
async fn join_pages(mut tasks: JoinSet<PageOutcome>) -> BuildOutcome {
    let mut outcome = BuildOutcome::default();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(PageOutcome::Sent) => outcome.pages += 1,
            Ok(PageOutcome::Dropped) => {}
            Ok(PageOutcome::Failed) => outcome.failed += 1,
            Err(e) => {
                ::log::error!("Page task panicked: {}", e);
                outcome.failed += 1;
            }
        }
    }
    outcome
}

/// Builds the `site` record and any root-level file records
fn preamble(root: &Path, site: &SiteConfig) -> Vec<Record> {
    let mut records = vec![Record::Site(SiteRecord::from(site))];

    for (name, wrap) in ROOT_FILES {
        let path = root.join(name);
        if !path.is_file() {
            ::log::debug!("No {} at site root", name);
            continue;
        }

        let content = read_file_safe(&path);
        if content.is_empty() {
            ::log::warn!("{} is empty, leaving it out of the manifest", name);
            continue;
        }

        records.push(wrap(FileRecord {
            path: format!("/{name}"),
            content,
        }));
    }

    records
}

/// Reads one file and extracts its page record; unreadable files yield an empty page
pub fn build_page(root: &Path, file: &Path, extractor: &Extractor) -> PageRecord {
    let html = read_file_safe(file);
    extractor.extract(site_path(root, file), &html)
}

/// Walks `root` depth-first in name order and returns the files accepted by `filter`.
///
/// Directories that cannot be listed are logged and skipped. Symlinked
/// directories are not followed.
pub fn discover_pages(root: &Path, filter: &PathFilter) -> Vec<PathBuf> {
    let mut pages = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                ::log::warn!("Cannot list {}: {}", dir.display(), e);
                continue;
            }
        };

        let mut entries: Vec<_> = entries.filter_map(|entry| entry.ok()).collect();
        entries.sort_by_key(|entry| entry.file_name());

        let mut subdirs = Vec::new();
        for entry in entries {
            let path = entry.path();
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

            if is_dir {
                subdirs.push(path);
            } else if path.is_file() && filter.is_page(&site_path(root, &path)) {
                ::log::debug!("Found page {}", path.display());
                pages.push(path);
            }
        }

        // Reversed so the stack pops subdirectories in name order
        pending.extend(subdirs.into_iter().rev());
    }

    pages
}
