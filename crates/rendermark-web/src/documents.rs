use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attachment {
    pub(crate) file_name: String,
    /// Type reported by the uploading client, if any.
    pub(crate) declared_content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Document {
    pub(crate) id: u64,
    pub(crate) subject: String,
    pub(crate) description: String,
    pub(crate) attachments: Vec<Attachment>,
}

/// Read-only document table served by the API.
#[derive(Debug, Clone, Default)]
pub(crate) struct DocumentStore {
    documents: Arc<BTreeMap<u64, Document>>,
}

impl DocumentStore {
    pub(crate) fn new(documents: impl IntoIterator<Item = Document>) -> Self {
        Self {
            documents: Arc::new(
                documents
                    .into_iter()
                    .map(|document| (document.id, document))
                    .collect(),
            ),
        }
    }

    pub(crate) fn seeded() -> Self {
        Self::new([
            Document {
                id: 1,
                subject: "Release checklist".to_string(),
                description: "See [the plan](/documents/2) and the \
                    [changelog](https://example.com/changelog).\n\n\
                    ![diagram](/attachments/1/diagram.png)"
                    .to_string(),
                attachments: vec![
                    Attachment {
                        file_name: "diagram.png".to_string(),
                        declared_content_type: Some("image/*".to_string()),
                    },
                    Attachment {
                        file_name: "notes.tar.gz".to_string(),
                        declared_content_type: Some("application/octet-stream".to_string()),
                    },
                    Attachment {
                        file_name: "README".to_string(),
                        declared_content_type: None,
                    },
                ],
            },
            Document {
                id: 2,
                subject: "Rollout plan".to_string(),
                description: "Steps live in [the wiki](/wiki/rollout).".to_string(),
                attachments: vec![Attachment {
                    file_name: "walkthrough.MOV".to_string(),
                    declared_content_type: Some("video/mp4".to_string()),
                }],
            },
        ])
    }

    pub(crate) fn get(&self, id: u64) -> Option<&Document> {
        self.documents.get(&id)
    }
}
