//! Integration tests for the extraction pipeline

extern crate std;

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::PathBuf;

use image::{DynamicImage, Rgba, RgbaImage};

// Import crate items
use assetkit::catalog::{
    AssetPayload, CatalogError, MemorySource, PresentationState, Rendition, RenditionKey, Scale,
    VectorDocument,
};
use assetkit::extractor::{
    run_detached, CancellationToken, ExtractionEvent, ExtractionOrchestrator, NullObserver,
    ProgressObserver, RunConfiguration, RunPhase,
};

fn solid(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([64, 128, 192, 255])))
}

/// Observer recording every delivered fraction
struct RecordingObserver {
    fractions: RefCell<Vec<f64>>,
}

impl RecordingObserver {
    fn new() -> Self {
        RecordingObserver { fractions: RefCell::new(Vec::new()) }
    }
}

impl ProgressObserver for RecordingObserver {
    fn on_progress(&self, fraction: f64) {
        self.fractions.borrow_mut().push(fraction);
    }
}

/// Observer cancelling the run on its nth progress signal
struct CancellingObserver {
    token: CancellationToken,
    seen: Cell<usize>,
    cancel_on: usize,
}

impl ProgressObserver for CancellingObserver {
    fn on_progress(&self, _fraction: f64) {
        let seen = self.seen.get() + 1;
        self.seen.set(seen);
        if seen == self.cancel_on {
            self.token.cancel();
        }
    }
}

fn flat_source() -> MemorySource {
    let mut source = MemorySource::new();
    source.push_named(Rendition::with_image("icon", Scale::Single, solid(8, 8)));
    source.push_named(Rendition::with_image("icon", Scale::Double, solid(16, 16)));
    source.push_named(Rendition::with_image("photos/shot", Scale::Single, solid(600, 400)));
    source.push_named(Rendition::with_data("notes", b"# Title\n\nsome text".to_vec()));
    source
}

#[test]
fn test_flat_catalog_full_run() {
    let source = flat_source();
    let mut orchestrator = ExtractionOrchestrator::new(RunConfiguration::default());

    let outcome = orchestrator.run(&source, &NullObserver).unwrap();
    std::assert!(!outcome.cancelled);
    std::assert_eq!(orchestrator.phase(), RunPhase::Completed);

    let filenames: Vec<&str> = outcome.descriptors.iter().map(|d| d.filename.as_str()).collect();
    std::assert_eq!(filenames, ["icon.png", "icon@2x.png", "photos_shot.png", "notes.md"]);

    for descriptor in &outcome.descriptors {
        match &descriptor.payload {
            AssetPayload::Image { encoded, .. } => {
                // Full mode always carries encoded bytes and a thumbnail
                std::assert!(encoded.as_ref().is_some_and(|bytes| !bytes.is_empty()));
                std::assert!(descriptor.thumbnail.is_some());
            }
            AssetPayload::Document { data, extension } => {
                std::assert_eq!(extension, "md");
                std::assert_eq!(data.as_slice(), b"# Title\n\nsome text");
                std::assert!(descriptor.thumbnail.is_some());
            }
        }
    }

    // The oversized raster's thumbnail fits the default bounding box
    let shot = &outcome.descriptors[2];
    let thumbnail = shot.thumbnail.as_ref().unwrap();
    std::assert!(thumbnail.width() <= 256 && thumbnail.height() <= 256);
}

#[test]
fn test_filenames_unique_across_colliding_names() {
    let mut source = MemorySource::new();
    // Both names clean to the same filename stem
    source.push_named(Rendition::with_image("icon/a", Scale::Single, solid(4, 4)));
    source.push_named(Rendition::with_image("icon_a", Scale::Single, solid(4, 4)));

    let mut orchestrator = ExtractionOrchestrator::new(RunConfiguration::default());
    let outcome = orchestrator.run(&source, &NullObserver).unwrap();

    let filenames: Vec<&str> = outcome.descriptors.iter().map(|d| d.filename.as_str()).collect();
    std::assert_eq!(filenames, ["icon_a.png", "icon_a_1.png"]);
}

#[test]
fn test_constrained_run_omits_encode_and_thumbnails() {
    let source = flat_source();
    let mut config = RunConfiguration::default();
    config.resource_constrained = true;

    let mut orchestrator = ExtractionOrchestrator::new(config);
    let outcome = orchestrator.run(&source, &NullObserver).unwrap();

    std::assert!(!outcome.descriptors.is_empty());
    for descriptor in &outcome.descriptors {
        std::assert!(descriptor.thumbnail.is_none());
        if let AssetPayload::Image { encoded, .. } = &descriptor.payload {
            std::assert!(encoded.is_none());
        }
    }
}

#[test]
fn test_constrained_run_stops_at_item_cap() {
    let mut source = MemorySource::new();
    for name in ["a", "b", "c", "d", "e"] {
        source.push_named(Rendition::with_image(name, Scale::Single, solid(4, 4)));
    }

    let mut config = RunConfiguration::default();
    config.resource_constrained = true;
    config.max_item_count = Some(2);

    let mut orchestrator = ExtractionOrchestrator::new(config);
    let outcome = orchestrator.run(&source, &NullObserver).unwrap();

    std::assert_eq!(outcome.descriptors.len(), 2);
    let filenames: Vec<&str> = outcome.descriptors.iter().map(|d| d.filename.as_str()).collect();
    std::assert_eq!(filenames, ["a.png", "b.png"]);
}

#[test]
fn test_constrained_run_prefers_high_density() {
    let mut source = MemorySource::new();
    source.push_named(Rendition::with_image("icon", Scale::Single, solid(8, 8)));
    source.push_named(Rendition::with_image("icon", Scale::Double, solid(16, 16)));

    let mut config = RunConfiguration::default();
    config.resource_constrained = true;

    let mut orchestrator = ExtractionOrchestrator::new(config);
    let outcome = orchestrator.run(&source, &NullObserver).unwrap();

    // The 1x variant is skipped once the 2x sibling is known to exist
    let filenames: Vec<&str> = outcome.descriptors.iter().map(|d| d.filename.as_str()).collect();
    std::assert_eq!(filenames, ["icon@2x.png"]);
}

#[test]
fn test_cancellation_mid_run() {
    let mut source = MemorySource::new();
    for name in ["a", "b", "c"] {
        source.push_named(Rendition::with_image(name, Scale::Single, solid(4, 4)));
    }

    let mut orchestrator = ExtractionOrchestrator::new(RunConfiguration::default());
    let observer = CancellingObserver {
        token: orchestrator.cancellation_token(),
        seen: Cell::new(0),
        cancel_on: 2,
    };

    let outcome = orchestrator.run(&source, &observer).unwrap();

    // Cancellation is not an error; only work committed before the
    // flag was observed remains, and no further progress fires
    std::assert!(outcome.cancelled);
    std::assert_eq!(orchestrator.phase(), RunPhase::Cancelled);
    std::assert_eq!(outcome.descriptors.len(), 1);
    std::assert_eq!(observer.seen.get(), 2);
}

#[test]
fn test_progress_fractions_bounded_and_ordered() {
    let mut source = MemorySource::new();
    for name in ["a", "b", "c"] {
        source.push_named(Rendition::with_image(name, Scale::Single, solid(4, 4)));
    }

    let mut orchestrator = ExtractionOrchestrator::new(RunConfiguration::default());
    let observer = RecordingObserver::new();
    orchestrator.run(&source, &observer).unwrap();

    let fractions = observer.fractions.borrow();
    std::assert_eq!(fractions.len(), 3);
    std::assert_eq!(fractions[0], 0.0);
    for window in fractions.windows(2) {
        std::assert!(window[0] <= window[1]);
    }
    for fraction in fractions.iter() {
        std::assert!((0.0..=1.0).contains(fraction));
    }
}

#[test]
fn test_theme_store_full_run() {
    let mut source = MemorySource::new();

    source.push_keyed(RenditionKey::new("button", Scale::Single, PresentationState::Normal),
                      Rendition::with_image("button", Scale::Single, solid(8, 8)));

    let mut selected_rendition = Rendition::with_image("button", Scale::Double, solid(16, 16));
    selected_rendition.state = PresentationState::Selected;
    source.push_keyed(RenditionKey::new("button", Scale::Double, PresentationState::Selected),
                      selected_rendition);

    let mut glyph_rendition = Rendition::new("star", Scale::Single);
    glyph_rendition.vector = Some(VectorDocument::new(b"%PDF-1.4 stub".to_vec()));
    source.push_keyed(RenditionKey::new("star", Scale::Single, PresentationState::Normal),
                      glyph_rendition);

    source.push_keyed(RenditionKey::new("settings", Scale::Single, PresentationState::Normal),
                      Rendition::with_data("settings", b"{\"a\":1}".to_vec()));

    source.push_failing_key(RenditionKey::new("broken", Scale::Single, PresentationState::Normal));

    source.push_keyed(RenditionKey::new("effect", Scale::Single, PresentationState::Normal),
                      Rendition::new("effect", Scale::Single));

    let mut orchestrator = ExtractionOrchestrator::new(RunConfiguration::default());
    let outcome = orchestrator.run(&source, &NullObserver).unwrap();

    // The failing key and the non-visual entry are skipped, not fatal
    let filenames: Vec<&str> = outcome.descriptors.iter().map(|d| d.filename.as_str()).collect();
    std::assert_eq!(filenames,
                    ["button.png", "button@2x_selected.png", "star-regular-M.pdf", "settings.json"]);

    match &outcome.descriptors[3].payload {
        AssetPayload::Document { extension, .. } => std::assert_eq!(extension, "json"),
        _ => std::panic!("expected a document descriptor"),
    }
}

#[test]
fn test_packed_assets_filtered_to_no_assets() {
    let mut source = MemorySource::new();
    for name in ["ZZZZPackedAsset-1.0", "ZZZZPackedAsset-2.0"] {
        let key = RenditionKey::new(name, Scale::Single, PresentationState::Normal);
        source.push_keyed(key, Rendition::with_image(name, Scale::Single, solid(4, 4)));
    }

    // Every entry matches the packed pattern, so a full traversal
    // produces nothing
    let mut orchestrator = ExtractionOrchestrator::new(RunConfiguration::default());
    let result = orchestrator.run(&source, &NullObserver);
    std::assert!(matches!(result, Err(CatalogError::NoAssetsProduced)));

    // Keeping packed assets turns the same container into a normal run
    let mut config = RunConfiguration::default();
    config.ignore_packed_assets = false;
    let mut orchestrator = ExtractionOrchestrator::new(config);
    let outcome = orchestrator.run(&source, &NullObserver).unwrap();
    std::assert_eq!(outcome.descriptors.len(), 2);
}

#[test]
fn test_empty_container_terminates_without_progress() {
    let source = MemorySource::new();
    let mut orchestrator = ExtractionOrchestrator::new(RunConfiguration::default());
    let observer = RecordingObserver::new();

    let result = orchestrator.run(&source, &observer);

    std::assert!(matches!(result, Err(CatalogError::NoAssetsProduced)));
    std::assert!(observer.fractions.borrow().is_empty());
}

#[test]
fn test_restricted_container_rejected_before_traversal() {
    let path = scratch_path("restricted.car");
    let mut bytes = b"compiled".to_vec();
    bytes.extend_from_slice(&assetkit::catalog::RESTRICTED_FORMAT_MARKER);
    fs::write(&path, &bytes).unwrap();

    let mut orchestrator = ExtractionOrchestrator::new(RunConfiguration::default());
    let result = orchestrator.run_container(path.to_str().unwrap(), &NullObserver);

    std::assert!(matches!(result, Err(CatalogError::UnsupportedRestrictedFormat)));
    std::assert_eq!(orchestrator.phase(), RunPhase::Rejected);

    let _ = fs::remove_file(&path);
}

#[test]
fn test_unresolved_container_paths() {
    let mut orchestrator = ExtractionOrchestrator::new(RunConfiguration::default());

    let result = orchestrator.run_container("", &NullObserver);
    std::assert!(matches!(result, Err(CatalogError::ContainerPathUnresolved)));

    let result = orchestrator.run_container("/no/such/container.car", &NullObserver);
    std::assert!(matches!(result, Err(CatalogError::ContainerPathUnresolved)));
}

#[test]
fn test_detached_run_delivers_single_completion() {
    let mut source = MemorySource::new();
    source.push_named(Rendition::with_image("a", Scale::Single, solid(4, 4)));
    source.push_named(Rendition::with_image("b", Scale::Single, solid(4, 4)));

    let (_token, receiver) = run_detached(Box::new(source), RunConfiguration::default());

    let mut completions = 0;
    let mut extracted = 0;
    for event in receiver {
        match event {
            ExtractionEvent::Progress(fraction) => {
                std::assert!((0.0..=1.0).contains(&fraction));
            }
            ExtractionEvent::Completed(result) => {
                completions += 1;
                extracted = result.unwrap().descriptors.len();
            }
        }
    }

    std::assert_eq!(completions, 1);
    std::assert_eq!(extracted, 2);
}

#[test]
fn test_bundle_directory_extraction() {
    let dir = scratch_path("bundle");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();

    solid(8, 8).save(dir.join("icon.png")).unwrap();
    solid(16, 16).save(dir.join("icon@2x.png")).unwrap();
    fs::write(dir.join("notes.md"), b"# Title\n\nsome text").unwrap();

    let mut orchestrator = ExtractionOrchestrator::new(RunConfiguration::default());
    let outcome = orchestrator
        .run_container(dir.to_str().unwrap(), &NullObserver)
        .unwrap();

    let filenames: Vec<&str> = outcome.descriptors.iter().map(|d| d.filename.as_str()).collect();
    std::assert_eq!(filenames, ["icon.png", "icon@2x.png", "notes.md"]);

    let _ = fs::remove_dir_all(&dir);
}

/// Per-test scratch location under the system temp directory
fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("assetkit_test_{}_{}", std::process::id(), name));
    path
}
