//! `system.*` facade.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{unimplemented, Rpc};
use crate::error::Result;
use crate::protocol::{param, Decode, Decoder, Value};

/// Remote method names of the system service.
pub mod methods {
    /// `system.multicall` (not implemented by this client).
    pub const MULTICALL: &str = "system.multicall";
    /// `system.listMethods`
    pub const LIST_METHODS: &str = "system.listMethods";
    /// `system.methodHelp`
    pub const METHOD_HELP: &str = "system.methodHelp";
    /// `system.methodSignature`
    pub const METHOD_SIGNATURE: &str = "system.methodSignature";
    /// `system.getAPIVersion`
    pub const GET_API_VERSION: &str = "system.getAPIVersion";

    /// Every method of this service.
    pub const ALL: &[&str] = &[
        MULTICALL,
        LIST_METHODS,
        METHOD_HELP,
        METHOD_SIGNATURE,
        GET_API_VERSION,
    ];
}

/// Version of the remote RPC interface, `[epoch, major, minor]` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApiVersion {
    pub epoch: i32,
    pub major: i32,
    pub minor: i32,
}

impl Decode for ApiVersion {
    fn decode(decoder: &Decoder, value: Value) -> Result<Self> {
        let [epoch, major, minor] = decoder.tuple::<3>(value)?;
        Ok(Self {
            epoch: decoder.field("epoch", epoch)?,
            major: decoder.field("major", major)?,
            minor: decoder.field("minor", minor)?,
        })
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.epoch, self.major, self.minor)
    }
}

/// System API service.
#[derive(Debug, Clone)]
pub struct SystemService {
    rpc: Rpc,
}

impl SystemService {
    pub(crate) fn new(rpc: Rpc) -> Self {
        Self { rpc }
    }

    /// `system.multicall` is not supported; always fails without a call.
    pub fn multicall(&self, _calls: &[Value]) -> Result<Vec<Value>> {
        Err(unimplemented(methods::MULTICALL))
    }

    /// Call `system.listMethods`.
    pub fn list_methods(&self) -> Result<Vec<String>> {
        self.rpc.call(methods::LIST_METHODS, None)
    }

    /// Call `system.methodHelp`.
    pub fn method_help(&self, method_name: &str) -> Result<String> {
        let args = self.rpc.pack([param::string(method_name)])?;
        self.rpc.call(methods::METHOD_HELP, Some(args))
    }

    /// Call `system.methodSignature`.
    pub fn method_signature(&self, method_name: &str) -> Result<Vec<String>> {
        let args = self.rpc.pack([param::string(method_name)])?;
        self.rpc.call(methods::METHOD_SIGNATURE, Some(args))
    }

    /// Call `system.getAPIVersion`.
    pub fn get_api_version(&self) -> Result<Vec<i32>> {
        self.rpc.call(methods::GET_API_VERSION, None)
    }

    /// Call `system.getAPIVersion`, expecting exactly `[epoch, major, minor]`.
    pub fn api_version(&self) -> Result<ApiVersion> {
        self.rpc.call(methods::GET_API_VERSION, None)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::TracRpcError;
    use crate::protocol::Omission;
    use crate::transport::MockTransport;

    fn service(mock: &Arc<MockTransport>) -> SystemService {
        SystemService::new(Rpc::new(mock.clone(), Omission::Trailing))
    }

    #[test]
    fn test_list_methods() {
        let mock = Arc::new(MockTransport::with_reply(vec![
            "system.multicall",
            "system.listMethods",
            "system.methodHelp",
        ]));

        let names = service(&mock).list_methods().unwrap();
        assert_eq!(
            names,
            vec!["system.multicall", "system.listMethods", "system.methodHelp"]
        );
        assert_eq!(mock.last_call().unwrap().method, methods::LIST_METHODS);
        assert_eq!(mock.last_call().unwrap().args, None);
    }

    #[test]
    fn test_method_help() {
        let mock = Arc::new(MockTransport::with_reply(
            "This method returns the help of the method.",
        ));

        let help = service(&mock).method_help("system.methodHelp").unwrap();
        assert_eq!(help, "This method returns the help of the method.");

        let call = mock.last_call().unwrap();
        assert_eq!(call.method, methods::METHOD_HELP);
        assert_eq!(call.args, Some(vec![Value::from("system.methodHelp")]));
    }

    #[test]
    fn test_method_signature() {
        let mock = Arc::new(MockTransport::with_reply(vec!["string", "string"]));

        let sig = service(&mock).method_signature("system.methodHelp").unwrap();
        assert_eq!(sig, vec!["string", "string"]);
        assert_eq!(mock.last_call().unwrap().method, methods::METHOD_SIGNATURE);
    }

    #[test]
    fn test_get_api_version() {
        let mock = Arc::new(MockTransport::with_reply(vec![1, 1, 8]));

        assert_eq!(service(&mock).get_api_version().unwrap(), vec![1, 1, 8]);
        assert_eq!(mock.last_call().unwrap().method, methods::GET_API_VERSION);
    }

    #[test]
    fn test_api_version() {
        let mock = Arc::new(MockTransport::with_reply(vec![1, 1, 8]));
        mock.push_reply(vec![1, 1]);

        let system = service(&mock);
        let version = system.api_version().unwrap();
        assert_eq!(
            version,
            ApiVersion {
                epoch: 1,
                major: 1,
                minor: 8
            }
        );
        assert_eq!(version.to_string(), "1.1.8");

        assert!(matches!(
            system.api_version().unwrap_err(),
            TracRpcError::ShapeMismatch { expected: "array of 3", .. }
        ));
    }

    #[test]
    fn test_get_api_version_type_mismatch() {
        let mock = Arc::new(MockTransport::with_reply(vec!["1", "1", "8"]));
        assert!(matches!(
            service(&mock).get_api_version().unwrap_err(),
            TracRpcError::ShapeMismatch {
                method: methods::GET_API_VERSION,
                expected: "int",
                ..
            }
        ));
    }

    #[test]
    fn test_multicall_unimplemented() {
        let mock = Arc::new(MockTransport::new());

        let err = service(&mock).multicall(&[]).unwrap_err();
        assert!(matches!(err, TracRpcError::Unimplemented(methods::MULTICALL)));
        assert_eq!(mock.call_count(), 0);
    }
}
