//! Test PDF Builder
//!
//! A builder for creating test PDFs with specific characteristics.

use anyhow::Result;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// PDF version to generate
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub enum PdfVersion {
    V1_4,
    V1_5,
    V1_7,
}

impl std::fmt::Display for PdfVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let version = match self {
            PdfVersion::V1_4 => "1.4",
            PdfVersion::V1_5 => "1.5",
            PdfVersion::V1_7 => "1.7",
        };
        write!(f, "{version}")
    }
}

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub width: i64,
    pub height: i64,
}

impl PageSpec {
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    /// US Letter
    pub fn letter() -> Self {
        Self::new(612, 792)
    }

    fn media_box(&self) -> Object {
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(self.width),
            Object::Integer(self.height),
        ])
    }
}

/// Builder for creating test PDFs
pub struct TestPdfBuilder {
    version: PdfVersion,
    pages: Vec<PageSpec>,
    title: Option<String>,
    producer: Option<String>,
    group_size: Option<usize>,
}

impl Default for TestPdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPdfBuilder {
    /// Create a builder with no pages
    pub fn new() -> Self {
        Self {
            version: PdfVersion::V1_5,
            pages: Vec::new(),
            title: None,
            producer: None,
            group_size: None,
        }
    }

    /// A single blank letter page
    pub fn minimal() -> Self {
        Self::new().with_page(PageSpec::letter())
    }

    pub fn with_version(mut self, version: PdfVersion) -> Self {
        self.version = version;
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn with_producer(mut self, producer: &str) -> Self {
        self.producer = Some(producer.to_string());
        self
    }

    pub fn with_page(mut self, page: PageSpec) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_pages(mut self, pages: impl IntoIterator<Item = PageSpec>) -> Self {
        self.pages.extend(pages);
        self
    }

    /// Split pages into intermediate page-tree nodes of `size` kids each.
    ///
    /// MediaBox and Resources are then only set on the root node, so every
    /// page inherits them. Uses the first page's dimensions for the tree.
    pub fn with_nested_tree(mut self, size: usize) -> Self {
        self.group_size = Some(size.max(1));
        self
    }

    /// Build the document model
    pub fn build_document(&self) -> Document {
        let mut doc = Document::with_version(self.version.to_string());
        let root_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut root = dictionary! {
            "Type" => "Pages",
            "Count" => self.pages.len() as i64,
        };

        let kids = match self.group_size {
            None => self
                .pages
                .iter()
                .enumerate()
                .map(|(index, spec)| {
                    let mut page = page_dictionary(&mut doc, index, root_id);
                    page.set("MediaBox", spec.media_box());
                    page.set("Resources", resources_id);
                    Object::Reference(doc.add_object(page))
                })
                .collect::<Vec<_>>(),
            Some(size) => {
                let tree_box = self.pages.first().copied().unwrap_or(PageSpec::letter());
                root.set("MediaBox", tree_box.media_box());
                root.set("Resources", resources_id);

                let mut groups = Vec::new();
                for (group, chunk) in self.pages.chunks(size).enumerate() {
                    let node_id = doc.new_object_id();
                    let leaves: Vec<Object> = (0..chunk.len())
                        .map(|offset| {
                            let page = page_dictionary(&mut doc, group * size + offset, node_id);
                            Object::Reference(doc.add_object(page))
                        })
                        .collect();
                    doc.objects.insert(
                        node_id,
                        Object::Dictionary(dictionary! {
                            "Type" => "Pages",
                            "Parent" => root_id,
                            "Count" => leaves.len() as i64,
                            "Kids" => leaves,
                        }),
                    );
                    groups.push(Object::Reference(node_id));
                }
                groups
            }
        };

        root.set("Kids", kids);
        doc.objects.insert(root_id, Object::Dictionary(root));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => root_id,
        });
        doc.trailer.set("Root", catalog_id);

        if self.title.is_some() || self.producer.is_some() {
            let mut info = Dictionary::new();
            if let Some(title) = &self.title {
                info.set("Title", Object::string_literal(title.as_str()));
            }
            if let Some(producer) = &self.producer {
                info.set("Producer", Object::string_literal(producer.as_str()));
            }
            let info_id = doc.add_object(info);
            doc.trailer.set("Info", info_id);
        }

        doc
    }

    /// Build the PDF bytes
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut doc = self.build_document();
        to_bytes(&mut doc)
    }
}

/// Serialize a document into memory
pub fn to_bytes(doc: &mut Document) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

/// A page dictionary with a one-line content stream naming the page
fn page_dictionary(doc: &mut Document, index: usize, parent: ObjectId) -> Dictionary {
    let content = format!("BT /F1 12 Tf 10 10 Td (Page {}) Tj ET", index + 1);
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
    dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "Contents" => content_id,
    }
}
