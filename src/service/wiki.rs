//! `wiki.*` facade.
//!
//! Page-scoped methods take the page name as `Option<&str>` and fail with
//! `InvalidArgument` when it is `None`, before anything is sent. Trailing
//! parameters such as `version` are simply left off the call when `None`.

use std::collections::BTreeMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{required, unimplemented, Rpc};
use crate::codec::Base64Codec;
use crate::error::Result;
use crate::protocol::{param, Decode, Decoder, Param, Value};

/// Remote method names of the wiki service.
pub mod methods {
    pub const GET_RECENT_CHANGES: &str = "wiki.getRecentChanges";
    pub const GET_RPC_VERSION_SUPPORTED: &str = "wiki.getRPCVersionSupported";
    pub const GET_PAGE: &str = "wiki.getPage";
    pub const GET_PAGE_VERSION: &str = "wiki.getPageVersion";
    pub const GET_PAGE_HTML: &str = "wiki.getPageHTML";
    pub const GET_PAGE_HTML_VERSION: &str = "wiki.getPageHTMLVersion";
    pub const GET_ALL_PAGES: &str = "wiki.getAllPages";
    pub const GET_PAGE_INFO: &str = "wiki.getPageInfo";
    pub const GET_PAGE_INFO_VERSION: &str = "wiki.getPageInfoVersion";
    pub const PUT_PAGE: &str = "wiki.putPage";
    pub const LIST_ATTACHMENTS: &str = "wiki.listAttachments";
    pub const GET_ATTACHMENT: &str = "wiki.getAttachment";
    pub const PUT_ATTACHMENT: &str = "wiki.putAttachment";
    pub const PUT_ATTACHMENT_EX: &str = "wiki.putAttachmentEx";
    pub const DELETE_PAGE: &str = "wiki.deletePage";
    pub const DELETE_ATTACHMENT: &str = "wiki.deleteAttachment";
    /// Not implemented by this client.
    pub const LIST_LINKS: &str = "wiki.listLinks";
    pub const WIKI_TO_HTML: &str = "wiki.wikiToHtml";

    /// Every method of this service.
    pub const ALL: &[&str] = &[
        GET_RECENT_CHANGES,
        GET_RPC_VERSION_SUPPORTED,
        GET_PAGE,
        GET_PAGE_VERSION,
        GET_PAGE_HTML,
        GET_PAGE_HTML_VERSION,
        GET_ALL_PAGES,
        GET_PAGE_INFO,
        GET_PAGE_INFO_VERSION,
        PUT_PAGE,
        LIST_ATTACHMENTS,
        GET_ATTACHMENT,
        PUT_ATTACHMENT,
        PUT_ATTACHMENT_EX,
        DELETE_PAGE,
        DELETE_ATTACHMENT,
        LIST_LINKS,
        WIKI_TO_HTML,
    ];
}

/// Page metadata returned by `getRecentChanges`, `getPageInfo` and `getPageInfoVersion`.
///
/// Every key is required in the reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub name: String,
    pub last_modified: DateTime<Utc>,
    pub author: String,
    pub version: i32,
    pub comment: String,
}

impl Decode for PageInfo {
    fn decode(decoder: &Decoder, value: Value) -> Result<Self> {
        let mut record = decoder.record(value)?;
        Ok(Self {
            name: record.required("name")?,
            last_modified: record.required("lastModified")?,
            author: record.required("author")?,
            version: record.required("version")?,
            comment: record.required("comment")?,
        })
    }
}

/// Optional attributes for `wiki.putPage`. Unset fields use server defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageAttributes {
    pub readonly: Option<bool>,
    pub author: Option<String>,
    pub comment: Option<String>,
}

impl PageAttributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the read-only flag.
    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = Some(readonly);
        self
    }

    /// Set the change author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the change comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Wire struct holding only the attributes that are set.
    pub fn to_value(&self) -> Value {
        let mut fields = BTreeMap::new();
        if let Some(readonly) = self.readonly {
            fields.insert("readonly".to_string(), Value::Bool(readonly));
        }
        if let Some(author) = &self.author {
            fields.insert("author".to_string(), Value::from(author));
        }
        if let Some(comment) = &self.comment {
            fields.insert("comment".to_string(), Value::from(comment));
        }
        Value::Struct(fields)
    }
}

/// Wiki API service.
#[derive(Debug, Clone)]
pub struct WikiService {
    rpc: Rpc,
}

impl WikiService {
    pub(crate) fn new(rpc: Rpc) -> Self {
        Self { rpc }
    }

    /// Call `wiki.getRecentChanges`.
    pub fn get_recent_changes(&self, since: Option<DateTime<Utc>>) -> Result<Vec<PageInfo>> {
        let args = self.rpc.pack([Param::from(since)])?;
        self.rpc.call(methods::GET_RECENT_CHANGES, Some(args))
    }

    /// Call `wiki.getRPCVersionSupported`.
    pub fn get_rpc_version_supported(&self) -> Result<i32> {
        self.rpc.call(methods::GET_RPC_VERSION_SUPPORTED, None)
    }

    /// Call `wiki.getPage`. Without `version` the latest version is returned.
    pub fn get_page(&self, page_name: Option<&str>, version: Option<i32>) -> Result<String> {
        self.page_scoped(methods::GET_PAGE, page_name, version)
    }

    /// Call `wiki.getPageVersion`.
    pub fn get_page_version(&self, page_name: Option<&str>, version: Option<i32>) -> Result<String> {
        self.page_scoped(methods::GET_PAGE_VERSION, page_name, version)
    }

    /// Call `wiki.getPageHTML`.
    pub fn get_page_html(&self, page_name: Option<&str>, version: Option<i32>) -> Result<String> {
        self.page_scoped(methods::GET_PAGE_HTML, page_name, version)
    }

    /// Call `wiki.getPageHTMLVersion`.
    pub fn get_page_html_version(
        &self,
        page_name: Option<&str>,
        version: Option<i32>,
    ) -> Result<String> {
        self.page_scoped(methods::GET_PAGE_HTML_VERSION, page_name, version)
    }

    /// Call `wiki.getAllPages`.
    pub fn get_all_pages(&self) -> Result<Vec<String>> {
        self.rpc.call(methods::GET_ALL_PAGES, None)
    }

    /// Call `wiki.getPageInfo`.
    pub fn get_page_info(&self, page_name: Option<&str>, version: Option<i32>) -> Result<PageInfo> {
        self.page_scoped(methods::GET_PAGE_INFO, page_name, version)
    }

    /// Call `wiki.getPageInfoVersion`.
    pub fn get_page_info_version(
        &self,
        page_name: Option<&str>,
        version: Option<i32>,
    ) -> Result<PageInfo> {
        self.page_scoped(methods::GET_PAGE_INFO_VERSION, page_name, version)
    }

    /// Call `wiki.putPage`.
    pub fn put_page(
        &self,
        page_name: Option<&str>,
        content: &str,
        attributes: &PageAttributes,
    ) -> Result<bool> {
        let page_name = required(methods::PUT_PAGE, "pagename", page_name)?;
        let args = self.rpc.pack([
            param::string(page_name),
            param::string(content),
            param::value(attributes.to_value()),
        ])?;
        self.rpc.call(methods::PUT_PAGE, Some(args))
    }

    /// Call `wiki.listAttachments`.
    pub fn list_attachments(&self, page_name: Option<&str>) -> Result<Vec<String>> {
        let page_name = required(methods::LIST_ATTACHMENTS, "pagename", page_name)?;
        let args = self.rpc.pack([param::string(page_name)])?;
        self.rpc.call(methods::LIST_ATTACHMENTS, Some(args))
    }

    /// Call `wiki.getAttachment`, returning the decoded bytes.
    pub fn get_attachment(&self, path: Option<&str>) -> Result<Bytes> {
        let path = required(methods::GET_ATTACHMENT, "path", path)?;
        let args = self.rpc.pack([param::string(path)])?;
        let reply = self.rpc.call_raw(methods::GET_ATTACHMENT, Some(args))?;
        Decoder::new(methods::GET_ATTACHMENT).binary(reply)
    }

    /// Call `wiki.putAttachment`.
    pub fn put_attachment(&self, path: Option<&str>, data: &[u8]) -> Result<bool> {
        let path = required(methods::PUT_ATTACHMENT, "path", path)?;
        let args = self
            .rpc
            .pack([param::string(path), Param::Present(Base64Codec::encode_value(data))])?;
        self.rpc.call(methods::PUT_ATTACHMENT, Some(args))
    }

    /// Call `wiki.putAttachmentEx`.
    ///
    /// NOTE: the server replies with the filename it stored the attachment
    /// under, not the boolean its own documentation describes.
    pub fn put_attachment_ex(
        &self,
        page_name: Option<&str>,
        filename: &str,
        description: &str,
        data: &[u8],
        replace: Option<bool>,
    ) -> Result<String> {
        let page_name = required(methods::PUT_ATTACHMENT_EX, "pagename", page_name)?;
        let args = self.rpc.pack([
            param::string(page_name),
            param::string(filename),
            param::string(description),
            Param::Present(Base64Codec::encode_value(data)),
            Param::from(replace),
        ])?;
        self.rpc.call(methods::PUT_ATTACHMENT_EX, Some(args))
    }

    /// Call `wiki.deletePage`. Without `version` all versions are deleted.
    pub fn delete_page(&self, page_name: Option<&str>, version: Option<i32>) -> Result<bool> {
        self.page_scoped(methods::DELETE_PAGE, page_name, version)
    }

    /// Call `wiki.deleteAttachment`.
    pub fn delete_attachment(&self, path: Option<&str>) -> Result<bool> {
        let path = required(methods::DELETE_ATTACHMENT, "path", path)?;
        let args = self.rpc.pack([param::string(path)])?;
        self.rpc.call(methods::DELETE_ATTACHMENT, Some(args))
    }

    /// `wiki.listLinks` is not implemented by the server plugin; always fails without a call.
    pub fn list_links(&self, _page_name: Option<&str>) -> Result<Vec<Value>> {
        Err(unimplemented(methods::LIST_LINKS))
    }

    /// Call `wiki.wikiToHtml`.
    pub fn wiki_to_html(&self, text: &str) -> Result<String> {
        let args = self.rpc.pack([param::string(text)])?;
        self.rpc.call(methods::WIKI_TO_HTML, Some(args))
    }

    /// `(pagename, [version])` methods.
    fn page_scoped<T: Decode>(
        &self,
        method: &'static str,
        page_name: Option<&str>,
        version: Option<i32>,
    ) -> Result<T> {
        let page_name = required(method, "pagename", page_name)?;
        let args = self.rpc.pack([param::string(page_name), Param::from(version)])?;
        self.rpc.call(method, Some(args))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;
    use crate::error::TracRpcError;
    use crate::protocol::Omission;
    use crate::transport::MockTransport;

    fn service(mock: &Arc<MockTransport>) -> WikiService {
        WikiService::new(Rpc::new(mock.clone(), Omission::Trailing))
    }

    fn page_struct(name: &str, author: &str, version: i32, when: DateTime<Utc>, comment: &str) -> Value {
        let mut fields = BTreeMap::new();
        fields.insert("name".to_string(), Value::from(name));
        fields.insert("author".to_string(), Value::from(author));
        fields.insert("version".to_string(), Value::Int(version));
        fields.insert("lastModified".to_string(), Value::from(when));
        fields.insert("comment".to_string(), Value::from(comment));
        Value::Struct(fields)
    }

    #[test]
    fn test_get_rpc_version_supported() {
        let mock = Arc::new(MockTransport::with_reply(2));
        assert_eq!(service(&mock).get_rpc_version_supported().unwrap(), 2);
        assert_eq!(mock.last_call().unwrap().args, None);
    }

    #[test]
    fn test_get_recent_changes_without_since() {
        let mock = Arc::new(MockTransport::with_reply(Value::Array(vec![])));

        assert!(service(&mock).get_recent_changes(None).unwrap().is_empty());
        // Omitted parameter still produces an (empty) argument list.
        assert_eq!(mock.last_call().unwrap().args, Some(vec![]));
    }

    #[test]
    fn test_page_text_methods() {
        type Call = fn(&WikiService, Option<&str>, Option<i32>) -> Result<String>;
        let cases: [(&str, Call); 4] = [
            (methods::GET_PAGE, WikiService::get_page),
            (methods::GET_PAGE_VERSION, WikiService::get_page_version),
            (methods::GET_PAGE_HTML, WikiService::get_page_html),
            (methods::GET_PAGE_HTML_VERSION, WikiService::get_page_html_version),
        ];

        for (method, call) in cases {
            let mock = Arc::new(MockTransport::with_reply("Shiga"));
            assert_eq!(call(&service(&mock), Some("shiga"), Some(1)).unwrap(), "Shiga");

            let recorded = mock.last_call().unwrap();
            assert_eq!(recorded.method, method);
            assert_eq!(recorded.args, Some(vec![Value::from("shiga"), Value::Int(1)]));
        }
    }

    #[test]
    fn test_get_page_without_version() {
        let mock = Arc::new(MockTransport::with_reply("= WikiStart ="));

        service(&mock).get_page(Some("WikiStart"), None).unwrap();
        assert_eq!(mock.last_call().unwrap().args, Some(vec![Value::from("WikiStart")]));
    }

    #[test]
    fn test_page_name_required() {
        let mock = Arc::new(MockTransport::new());
        let wiki = service(&mock);

        let results = [
            wiki.get_page(None, Some(1)).map(drop),
            wiki.get_page_info(None, None).map(drop),
            wiki.put_page(None, "content", &PageAttributes::new()).map(drop),
            wiki.list_attachments(None).map(drop),
            wiki.get_attachment(None).map(drop),
            wiki.put_attachment(None, b"x").map(drop),
            wiki.put_attachment_ex(None, "a.txt", "", b"x", None).map(drop),
            wiki.delete_page(None, None).map(drop),
            wiki.delete_attachment(None).map(drop),
        ];
        for result in results {
            assert!(matches!(result, Err(TracRpcError::InvalidArgument(_))));
        }
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_get_page_info() {
        let when = Utc.with_ymd_and_hms(1860, 3, 24, 0, 0, 0).unwrap();
        let mock = Arc::new(MockTransport::with_reply(page_struct(
            "sakuradamon",
            "n_ii",
            1,
            when,
            "ouch",
        )));

        let info = service(&mock).get_page_info(Some("sakuradamon"), Some(1)).unwrap();
        assert_eq!(
            info,
            PageInfo {
                name: "sakuradamon".into(),
                last_modified: when,
                author: "n_ii".into(),
                version: 1,
                comment: "ouch".into(),
            }
        );
        assert_eq!(mock.last_call().unwrap().method, methods::GET_PAGE_INFO);
    }

    #[test]
    fn test_get_page_info_missing_key() {
        let when = Utc.with_ymd_and_hms(1860, 3, 24, 0, 0, 0).unwrap();
        let mut reply = page_struct("sakuradamon", "n_ii", 1, when, "ouch");
        if let Value::Struct(fields) = &mut reply {
            fields.remove("comment");
        }
        let mock = Arc::new(MockTransport::with_reply(reply));

        match service(&mock).get_page_info_version(Some("sakuradamon"), Some(1)) {
            Err(TracRpcError::ShapeMismatch {
                method,
                field,
                actual,
                ..
            }) => {
                assert_eq!(method, methods::GET_PAGE_INFO_VERSION);
                assert_eq!(field, "comment");
                assert_eq!(actual, "missing");
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_put_page_packs_only_set_attributes() {
        let mock = Arc::new(MockTransport::with_reply(true));
        let attributes = PageAttributes::new().readonly(true).author("murasakishikibu");

        assert!(service(&mock)
            .put_page(Some("shiga"), "content", &attributes)
            .unwrap());

        let mut expected = BTreeMap::new();
        expected.insert("readonly".to_string(), Value::Bool(true));
        expected.insert("author".to_string(), Value::from("murasakishikibu"));
        assert_eq!(
            mock.last_call().unwrap().args,
            Some(vec![
                Value::from("shiga"),
                Value::from("content"),
                Value::Struct(expected),
            ])
        );
    }

    #[test]
    fn test_put_page_empty_attributes() {
        let mock = Arc::new(MockTransport::with_reply(true));

        service(&mock)
            .put_page(Some("shiga"), "content", &PageAttributes::default())
            .unwrap();
        let args = mock.last_call().unwrap().args.unwrap();
        assert_eq!(args.len(), 3);
        assert_eq!(args[2], Value::Struct(BTreeMap::new()));
    }

    #[test]
    fn test_list_attachments() {
        let mock = Arc::new(MockTransport::with_reply(vec![
            "WikiTest/Otsu.txt",
            "WikiTest/Kyoto.txt",
        ]));

        let paths = service(&mock).list_attachments(Some("WikiTest")).unwrap();
        assert_eq!(paths, vec!["WikiTest/Otsu.txt", "WikiTest/Kyoto.txt"]);
    }

    #[test]
    fn test_get_attachment() {
        let mock = Arc::new(MockTransport::with_reply(Value::Base64("5ruL6LOA".into())));

        let data = service(&mock).get_attachment(Some("WikiTest/Otsu.txt")).unwrap();
        assert_eq!(&data[..], "滋賀".as_bytes());
        assert_eq!(
            mock.last_call().unwrap().args,
            Some(vec![Value::from("WikiTest/Otsu.txt")])
        );
    }

    #[test]
    fn test_get_attachment_invalid_base64() {
        let mock = Arc::new(MockTransport::with_reply(Value::Base64("滋賀".into())));

        assert!(matches!(
            service(&mock).get_attachment(Some("WikiTest/Otsu.txt")),
            Err(TracRpcError::Decoding(_))
        ));
    }

    #[test]
    fn test_put_attachment() {
        let mock = Arc::new(MockTransport::with_reply(true));

        assert!(service(&mock)
            .put_attachment(Some("WikiTest/Shiga.txt"), "滋賀".as_bytes())
            .unwrap());
        assert_eq!(
            mock.last_call().unwrap().args,
            Some(vec![
                Value::from("WikiTest/Shiga.txt"),
                Value::Base64("5ruL6LOA".into()),
            ])
        );
    }

    #[test]
    fn test_put_attachment_ex_returns_filename() {
        let mock = Arc::new(MockTransport::with_reply("Shiga.txt"));

        let stored = service(&mock)
            .put_attachment_ex(Some("WikiTest"), "Shiga.txt", "test desc", b"", Some(true))
            .unwrap();
        assert_eq!(stored, "Shiga.txt");
        assert_eq!(
            mock.last_call().unwrap().args,
            Some(vec![
                Value::from("WikiTest"),
                Value::from("Shiga.txt"),
                Value::from("test desc"),
                Value::Base64(String::new()),
                Value::Bool(true),
            ])
        );
    }

    #[test]
    fn test_put_attachment_ex_rejects_boolean_reply() {
        let mock = Arc::new(MockTransport::with_reply(true));

        assert!(matches!(
            service(&mock).put_attachment_ex(Some("WikiTest"), "a.txt", "", b"", None),
            Err(TracRpcError::ShapeMismatch {
                expected: "string",
                ..
            })
        ));
        assert_eq!(mock.last_call().unwrap().args.unwrap().len(), 4);
    }

    #[test]
    fn test_delete_page() {
        let mock = Arc::new(MockTransport::with_reply(true));

        assert!(service(&mock).delete_page(Some("WikiTest"), Some(1)).unwrap());
        let recorded = mock.last_call().unwrap();
        assert_eq!(recorded.method, methods::DELETE_PAGE);
        assert_eq!(recorded.args, Some(vec![Value::from("WikiTest"), Value::Int(1)]));
    }

    #[test]
    fn test_delete_attachment() {
        let mock = Arc::new(MockTransport::with_reply(true));

        assert!(service(&mock).delete_attachment(Some("WikiTest/Shiga.txt")).unwrap());
        assert_eq!(mock.last_call().unwrap().method, methods::DELETE_ATTACHMENT);
    }

    #[test]
    fn test_wiki_to_html() {
        let mock = Arc::new(MockTransport::with_reply("<p>\nTest\n</p>\n"));

        assert_eq!(service(&mock).wiki_to_html("Test").unwrap(), "<p>\nTest\n</p>\n");
        assert_eq!(mock.last_call().unwrap().args, Some(vec![Value::from("Test")]));
    }

    #[test]
    fn test_list_links_unimplemented() {
        let mock = Arc::new(MockTransport::new());

        assert!(matches!(
            service(&mock).list_links(Some("WikiStart")),
            Err(TracRpcError::Unimplemented(methods::LIST_LINKS))
        ));
        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_methods_table() {
        assert_eq!(methods::ALL.len(), 18);
        assert!(methods::ALL.iter().all(|m| m.starts_with("wiki.")));
    }
}
