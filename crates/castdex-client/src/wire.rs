use serde::{Deserialize, Serialize};

use castdex_model::{CatalogPage, Character, PageMeta};

/// Response body of a catalog page request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEnvelope {
    pub info: PageInfo,
    pub results: Vec<Character>,
}

/// Pagination block of the catalog response.
///
/// `next`/`prev` cursor URLs also appear on the wire; the engine derives
/// has-more from `pages`, so they are ignored here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageInfo {
    pub count: u64,
    pub pages: u32,
}

impl PageEnvelope {
    pub fn into_page(self) -> CatalogPage {
        CatalogPage {
            items: self.results,
            meta: PageMeta {
                total_count: self.info.count,
                total_pages: self.info.pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castdex_model::{CharacterGender, CharacterStatus};

    const PAGE_BODY: &str = r#"{
        "info": { "count": 826, "pages": 42, "next": "/character?page=2", "prev": null },
        "results": [{
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "gender": "Male",
            "origin": { "name": "Earth (C-137)", "url": "/location/1" },
            "location": { "name": "Citadel of Ricks", "url": "/location/3" },
            "image": "/avatar/1.jpeg",
            "created": "2017-11-04T18:48:46.250Z"
        }]
    }"#;

    #[test]
    fn decodes_a_catalog_page_body() {
        let envelope: PageEnvelope = serde_json::from_str(PAGE_BODY).unwrap();
        let page = envelope.into_page();

        assert_eq!(page.meta.total_count, 826);
        assert_eq!(page.meta.total_pages, 42);
        assert_eq!(page.items.len(), 1);

        let rick = &page.items[0];
        assert_eq!(rick.id, 1);
        assert_eq!(rick.status, CharacterStatus::Alive);
        assert_eq!(rick.gender, CharacterGender::Male);
        assert_eq!(rick.origin.name, "Earth (C-137)");
    }

    #[test]
    fn rejects_a_malformed_body() {
        let result: Result<PageEnvelope, _> = serde_json::from_str(r#"{"info":{}}"#);
        assert!(result.is_err());
    }
}
