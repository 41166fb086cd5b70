//! In-memory collaborators for pipeline tests.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use folio_core::{
    AssetKind, AssetRepository, Book, BookAsset, BookRepository, CoverFetcher, Error,
    FetchedImage, ObjectStore, Result, TocSource,
};

// =============================================================================
// CATALOG STORE
// =============================================================================

#[derive(Default)]
struct CatalogState {
    books: BTreeMap<i64, Book>,
    assets: Vec<BookAsset>,
    next_asset_id: i64,
}

/// In-memory catalog implementing both repository traits. A single lock
/// makes the relocation commit atomic, mirroring the per-record
/// transaction of the real store.
#[derive(Default)]
pub struct MemoryCatalog {
    state: Mutex<CatalogState>,
    fail_set_toc: Mutex<HashSet<i64>>,
    fail_commit: Mutex<HashSet<i64>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_book(&self, id: i64, isbn: &str, toc: Option<&str>, cover_source_url: Option<&str>) {
        let mut state = self.state.lock().unwrap();
        state.books.insert(
            id,
            Book {
                id,
                isbn: isbn.to_string(),
                title: format!("Book {id}"),
                toc: toc.map(String::from),
                cover_source_url: cover_source_url.map(String::from),
            },
        );
    }

    pub fn seed_asset(&self, book_id: i64, kind: AssetKind, url: &str) {
        let mut state = self.state.lock().unwrap();
        state.next_asset_id += 1;
        let id = state.next_asset_id;
        state.assets.push(BookAsset {
            id,
            book_id,
            kind,
            url: url.to_string(),
        });
    }

    pub fn book(&self, id: i64) -> Book {
        self.state.lock().unwrap().books[&id].clone()
    }

    pub fn assets_for(&self, book_id: i64, kind: AssetKind) -> Vec<BookAsset> {
        self.state
            .lock()
            .unwrap()
            .assets
            .iter()
            .filter(|a| a.book_id == book_id && a.kind == kind)
            .cloned()
            .collect()
    }

    /// Make `set_toc` fail for the given book.
    pub fn fail_set_toc(&self, book_id: i64) {
        self.fail_set_toc.lock().unwrap().insert(book_id);
    }

    /// Make `commit_relocation` fail for the given book.
    pub fn fail_commit(&self, book_id: i64) {
        self.fail_commit.lock().unwrap().insert(book_id);
    }
}

#[async_trait]
impl BookRepository for MemoryCatalog {
    async fn toc_candidates(&self, limit: Option<i64>) -> Result<Vec<Book>> {
        let state = self.state.lock().unwrap();
        let candidates = state
            .books
            .values()
            .filter(|b| b.toc.as_deref().map_or(true, str::is_empty))
            .cloned();
        Ok(match limit {
            Some(n) => candidates.take(n.max(0) as usize).collect(),
            None => candidates.collect(),
        })
    }

    async fn cover_candidates(&self) -> Result<Vec<Book>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .books
            .values()
            .filter(|b| b.cover_source_url.is_some())
            .cloned()
            .collect())
    }

    async fn set_toc(&self, id: i64, toc: &str) -> Result<()> {
        if self.fail_set_toc.lock().unwrap().contains(&id) {
            return Err(Error::Internal("injected set_toc failure".into()));
        }
        let mut state = self.state.lock().unwrap();
        let book = state.books.get_mut(&id).ok_or(Error::BookNotFound(id))?;
        book.toc = Some(toc.to_string());
        Ok(())
    }
}

#[async_trait]
impl AssetRepository for MemoryCatalog {
    async fn commit_relocation(&self, book_id: i64, kind: AssetKind, url: &str) -> Result<()> {
        if self.fail_commit.lock().unwrap().contains(&book_id) {
            return Err(Error::Internal("injected commit failure".into()));
        }
        let mut state = self.state.lock().unwrap();
        if !state.books.contains_key(&book_id) {
            return Err(Error::BookNotFound(book_id));
        }
        state
            .assets
            .retain(|a| !(a.book_id == book_id && a.kind == kind));
        state.next_asset_id += 1;
        let id = state.next_asset_id;
        state.assets.push(BookAsset {
            id,
            book_id,
            kind,
            url: url.to_string(),
        });
        if let Some(book) = state.books.get_mut(&book_id) {
            book.cover_source_url = None;
        }
        Ok(())
    }

    async fn find(&self, book_id: i64, kind: AssetKind) -> Result<Option<BookAsset>> {
        Ok(self.assets_for(book_id, kind).into_iter().next())
    }
}

// =============================================================================
// LOOKUP SOURCE
// =============================================================================

/// Scripted reply for one ISBN.
pub enum TocReply {
    Found(String),
    Absent,
    Fail(String),
}

/// Scripted table-of-contents source.
#[derive(Default)]
pub struct ScriptedTocSource {
    replies: Mutex<HashMap<String, TocReply>>,
    calls: AtomicUsize,
}

impl ScriptedTocSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, isbn: &str, reply: TocReply) {
        self.replies.lock().unwrap().insert(isbn.to_string(), reply);
    }

    /// Total lookup calls made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TocSource for ScriptedTocSource {
    async fn fetch_toc(&self, isbn: &str) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.lock().unwrap().get(isbn) {
            Some(TocReply::Found(text)) => Ok(Some(text.clone())),
            Some(TocReply::Absent) => Ok(None),
            Some(TocReply::Fail(msg)) => Err(Error::Lookup(msg.clone())),
            None => Err(Error::Lookup(format!("no scripted reply for {isbn}"))),
        }
    }
}

// =============================================================================
// COVER FETCHER
// =============================================================================

/// Scripted downloader that tracks in-flight concurrency.
pub struct ScriptedFetcher {
    fail_urls: Mutex<HashSet<String>>,
    panic_urls: Mutex<HashSet<String>>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            fail_urls: Mutex::new(HashSet::new()),
            panic_urls: Mutex::new(HashSet::new()),
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn fail_for(&self, url: &str) {
        self.fail_urls.lock().unwrap().insert(url.to_string());
    }

    pub fn panic_for(&self, url: &str) {
        self.panic_urls.lock().unwrap().insert(url.to_string());
    }

    /// Highest number of downloads that were ever in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CoverFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        if self.panic_urls.lock().unwrap().contains(url) {
            panic!("scripted panic for {url}");
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = if self.fail_urls.lock().unwrap().contains(url) {
            Err(Error::Download(format!("HTTP 404 Not Found from {url}")))
        } else {
            Ok(FetchedImage {
                bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
                content_type: Some("image/jpeg".to_string()),
            })
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

// =============================================================================
// OBJECT STORE
// =============================================================================

/// In-memory object store.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    fail: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Storage("injected store failure".into()));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (bytes.to_vec(), content_type.to_string()));
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://store.test/covers/{key}")
    }
}
