//! Page copying
//!
//! Builds a fresh destination document that carries every page of a source
//! document, in source order, under a single flat page tree. Pages keep their
//! content streams and resources untouched; attributes they used to inherit
//! from intermediate page-tree nodes are copied onto the page itself so that
//! flattening the tree never changes how a page renders.

use crate::error::{EncryptError, EncryptResult};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use std::collections::BTreeSet;

/// Page attributes that may be inherited from ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Copy all pages of `source` into a new document.
///
/// The source catalog, page-tree nodes and outlines are left behind; every
/// other object the pages reach (content streams, fonts, images) is carried
/// over with its original object number. The document information
/// dictionary is kept when the source has one.
pub fn copy_pages(source: &Document) -> EncryptResult<Document> {
    let pages = source.get_pages();
    if pages.is_empty() {
        return Err(EncryptError::Processing(
            "document does not contain any pages".to_string(),
        ));
    }

    let mut destination = Document::with_version(source.version.clone());
    destination.max_id = source.max_id;

    let page_ids: BTreeSet<ObjectId> = pages.values().copied().collect();
    for (id, object) in &source.objects {
        if page_ids.contains(id) || is_structural(object) {
            continue;
        }
        destination.objects.insert(*id, object.clone());
    }

    let pages_id = destination.new_object_id();
    let mut kids = Vec::with_capacity(pages.len());

    // get_pages is keyed by page number, so iteration follows reading order
    for page_id in pages.values() {
        let mut page = flatten_page(source, *page_id)?;
        page.set("Parent", pages_id);
        destination
            .objects
            .insert(*page_id, Object::Dictionary(page));
        kids.push(Object::Reference(*page_id));
    }

    let count = kids.len() as i64;
    destination.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = destination.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    destination.trailer.set("Root", catalog_id);

    if let Ok(info) = source.trailer.get(b"Info") {
        destination.trailer.set("Info", info.clone());
    }

    let pruned = destination.prune_objects();
    tracing::trace!(pruned = pruned.len(), "dropped unreferenced objects");

    Ok(destination)
}

/// Clone a page dictionary and resolve inherited attributes onto it.
fn flatten_page(source: &Document, page_id: ObjectId) -> EncryptResult<Dictionary> {
    let mut page = source.get_dictionary(page_id)?.clone();
    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut visited = BTreeSet::new();

    while let Some(node_id) = parent {
        // malformed trees can loop back on themselves
        if !visited.insert(node_id) {
            break;
        }
        let node = source.get_dictionary(node_id)?;
        for key in INHERITABLE_KEYS {
            if page.has(key) {
                continue;
            }
            if let Ok(value) = node.get(key) {
                page.set(key, value.clone());
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(page)
}

fn is_structural(object: &Object) -> bool {
    matches!(
        object.type_name(),
        Ok(b"Catalog" | b"Pages" | b"Page" | b"Outlines" | b"XRef" | b"ObjStm")
    )
}
