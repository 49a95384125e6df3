//! Provisioning request and the server payload sent to the panel.
//!
//! The create-server body is loosely typed: flags may be booleans, numbers or strings and
//! a key explicitly set to `null` counts as provided. [`CreateServerRequest`] keeps the raw
//! JSON values so that presence and truthiness can be checked separately before they are
//! normalized into a [`ProvisionServerParam`].

use serde::Serialize;
use serde_json::Value;

use crate::server::{
    error::validation::ValidationError,
    model::identity::Identity,
    util::parse::{flag_to_egg_value, parse_flag, truthy_text},
};

pub const REQUIREMENTS_FILE: &str = "requirements.txt";

pub const SERVER_MEMORY_MB: u32 = 200;
pub const SERVER_DISK_MB: u32 = 500;

/// Raw create-server request as posted by the dashboard.
///
/// Each field is `None` when the key is missing from the body and `Some` otherwise,
/// including `Some(Value::Null)` for an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateServerRequest {
    pub user_uploaded_files: Option<Value>,
    pub auto_update: Option<Value>,
    pub main_file: Option<Value>,
    pub extra_packages: Option<Value>,
}

impl CreateServerRequest {
    /// Reads the request fields from a parsed JSON body.
    ///
    /// Bodies that are not JSON objects yield a request with every field missing.
    pub fn from_json(body: &Value) -> Self {
        Self {
            user_uploaded_files: body.get("user_uploaded_files").cloned(),
            auto_update: body.get("auto_update").cloned(),
            main_file: body.get("mainFile").cloned(),
            extra_packages: body.get("extraPackages").cloned(),
        }
    }

    /// Validates the request and normalizes it into provisioning parameters.
    ///
    /// Fields are checked in order and the first failure is returned.
    ///
    /// # Returns
    /// - `Ok(ProvisionServerParam)` - Normalized parameters
    /// - `Err(ValidationError::MissingField(_))` - `user_uploaded_files` or `auto_update`
    ///   missing, or `mainFile` missing or falsy
    pub fn into_param(self) -> Result<ProvisionServerParam, ValidationError> {
        let user_uploaded_files = self
            .user_uploaded_files
            .ok_or(ValidationError::MissingField("User Uploaded Files"))?;
        let auto_update = self
            .auto_update
            .ok_or(ValidationError::MissingField("Auto Update"))?;
        let main_file = self
            .main_file
            .as_ref()
            .and_then(truthy_text)
            .ok_or(ValidationError::MissingField("App py file"))?;
        let extra_packages = self
            .extra_packages
            .as_ref()
            .and_then(truthy_text)
            .unwrap_or_default();

        Ok(ProvisionServerParam {
            user_uploaded_files: parse_flag(&user_uploaded_files),
            auto_update: parse_flag(&auto_update),
            main_file,
            extra_packages,
        })
    }
}

/// Validated provisioning parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionServerParam {
    pub user_uploaded_files: bool,
    /// Run `git pull` on start when the server holds a git checkout.
    pub auto_update: bool,
    /// Python entry point below `/home/container`.
    pub main_file: String,
    /// Space separated pip packages, may be empty.
    pub extra_packages: String,
}

impl ProvisionServerParam {
    /// Builds the single-line startup command for the Python egg.
    ///
    /// The auto update flag and package list are substituted directly. The entry point and
    /// requirements file are left as `${PY_FILE}` and `${REQUIREMENTS_FILE}` for the panel
    /// to expand from the server's environment.
    pub fn startup_script(&self) -> String {
        let auto = flag_to_egg_value(self.auto_update);
        let pkgs = &self.extra_packages;

        format!(
            "if [[ -d .git ]] && [[ \"{auto}\" == \"1\" ]]; then git pull; fi; \
             if [[ -n \"{pkgs}\" ]]; then pip install -U --prefix .local {pkgs}; fi; \
             if [[ -f /home/container/${{REQUIREMENTS_FILE}} ]]; then pip install -U --prefix .local -r /home/container/${{REQUIREMENTS_FILE}}; fi; \
             /usr/local/bin/python /home/container/${{PY_FILE}}"
        )
    }

    /// Egg variables for the server, rendered the way the panel stores them.
    pub fn environment(&self) -> ServerEnvironment {
        ServerEnvironment {
            py_file: self.main_file.clone(),
            requirements_file: REQUIREMENTS_FILE.to_string(),
            user_upload: flag_to_egg_value(self.user_uploaded_files),
            auto_update: flag_to_egg_value(self.auto_update),
            py_packages: self.extra_packages.clone(),
        }
    }

    /// Assembles the panel's create-server payload.
    ///
    /// # Arguments
    /// - `identity` - Owner's Discord identity, used for the server name
    /// - `panel_user_id` - Panel user that will own the server
    /// - `allocation_id` - Free allocation to bind the server to
    /// - `egg_id` - Python egg to install
    /// - `docker_image` - Container image for the egg
    pub fn into_panel_server(
        self,
        identity: &Identity,
        panel_user_id: u64,
        allocation_id: u64,
        egg_id: u32,
        docker_image: &str,
    ) -> CreatePanelServerParam {
        CreatePanelServerParam {
            name: identity.server_name(),
            user: panel_user_id,
            egg: egg_id,
            docker_image: docker_image.to_string(),
            startup: self.startup_script(),
            environment: self.environment(),
            limits: ServerLimits::default(),
            feature_limits: FeatureLimits::default(),
            allocation: AllocationParam {
                default: allocation_id,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ServerEnvironment {
    pub py_file: String,
    pub requirements_file: String,
    pub user_upload: String,
    pub auto_update: String,
    pub py_packages: String,
}

/// Resource limits, memory and disk in MB, cpu in percent of one core.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerLimits {
    pub memory: u32,
    pub swap: u32,
    pub disk: u32,
    pub io: u32,
    pub cpu: u32,
}

impl Default for ServerLimits {
    fn default() -> Self {
        Self {
            memory: SERVER_MEMORY_MB,
            swap: 0,
            disk: SERVER_DISK_MB,
            io: 500,
            cpu: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureLimits {
    pub databases: u32,
    pub allocations: u32,
    pub backups: u32,
}

impl Default for FeatureLimits {
    fn default() -> Self {
        Self {
            databases: 0,
            allocations: 1,
            backups: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationParam {
    pub default: u64,
}

/// Body of `POST /api/application/servers`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePanelServerParam {
    pub name: String,
    pub user: u64,
    pub egg: u32,
    pub docker_image: String,
    pub startup: String,
    pub environment: ServerEnvironment,
    pub limits: ServerLimits,
    pub feature_limits: FeatureLimits,
    pub allocation: AllocationParam,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(body: Value) -> Result<ProvisionServerParam, ValidationError> {
        CreateServerRequest::from_json(&body).into_param()
    }

    /// Tests the order of validation checks.
    ///
    /// Expected: the first missing field is reported
    #[test]
    fn reports_first_missing_field() {
        assert_eq!(
            request(json!({})),
            Err(ValidationError::MissingField("User Uploaded Files"))
        );
        assert_eq!(
            request(json!({ "user_uploaded_files": false })),
            Err(ValidationError::MissingField("Auto Update"))
        );
        assert_eq!(
            request(json!({ "user_uploaded_files": false, "auto_update": false })),
            Err(ValidationError::MissingField("App py file"))
        );
    }

    /// Tests that an explicit null counts as provided.
    ///
    /// Expected: null flags pass validation and normalize to false, a null main file fails
    #[test]
    fn explicit_null_is_present() {
        let param = request(json!({
            "user_uploaded_files": null,
            "auto_update": null,
            "mainFile": "bot.py"
        }))
        .unwrap();

        assert!(!param.user_uploaded_files);
        assert!(!param.auto_update);

        assert_eq!(
            request(json!({
                "user_uploaded_files": true,
                "auto_update": true,
                "mainFile": null
            })),
            Err(ValidationError::MissingField("App py file"))
        );
    }

    /// Tests that an empty main file is rejected.
    ///
    /// Expected: validation error naming the App py file field
    #[test]
    fn rejects_empty_main_file() {
        assert_eq!(
            request(json!({ "user_uploaded_files": "0", "auto_update": "0", "mainFile": "" })),
            Err(ValidationError::MissingField("App py file"))
        );
    }

    /// Tests a body that is not a JSON object.
    ///
    /// Expected: treated as having no fields
    #[test]
    fn non_object_body_has_no_fields() {
        assert_eq!(
            request(json!([1, 2, 3])),
            Err(ValidationError::MissingField("User Uploaded Files"))
        );
    }

    /// Tests flag and package normalization.
    ///
    /// Expected: string flags parsed, falsy packages become empty
    #[test]
    fn normalizes_fields() {
        let param = request(json!({
            "user_uploaded_files": "true",
            "auto_update": "1",
            "mainFile": "bot.py",
            "extraPackages": false
        }))
        .unwrap();

        assert_eq!(
            param,
            ProvisionServerParam {
                user_uploaded_files: true,
                auto_update: true,
                main_file: "bot.py".to_string(),
                extra_packages: String::new(),
            }
        );
    }

    /// Tests the startup command.
    ///
    /// Expected: flag and packages substituted, egg variables left for the panel
    #[test]
    fn builds_startup_script() {
        let param = ProvisionServerParam {
            user_uploaded_files: false,
            auto_update: true,
            main_file: "main.py".to_string(),
            extra_packages: "discord.py aiohttp".to_string(),
        };

        assert_eq!(
            param.startup_script(),
            "if [[ -d .git ]] && [[ \"1\" == \"1\" ]]; then git pull; fi; \
             if [[ -n \"discord.py aiohttp\" ]]; then pip install -U --prefix .local discord.py aiohttp; fi; \
             if [[ -f /home/container/${REQUIREMENTS_FILE} ]]; then pip install -U --prefix .local -r /home/container/${REQUIREMENTS_FILE}; fi; \
             /usr/local/bin/python /home/container/${PY_FILE}"
        );
    }

    /// Tests the serialized panel payload.
    ///
    /// Expected: environment keys in egg variable form, fixed limits, allocation nested
    #[test]
    fn serializes_panel_server_payload() {
        let identity = Identity {
            id: "1".to_string(),
            username: "Nelly".to_string(),
            email: None,
            avatar: None,
        };
        let param = ProvisionServerParam {
            user_uploaded_files: true,
            auto_update: false,
            main_file: "main.py".to_string(),
            extra_packages: String::new(),
        };

        let value = serde_json::to_value(param.into_panel_server(
            &identity,
            7,
            42,
            16,
            "ghcr.io/parkervcp/yolks:python_3.12",
        ))
        .unwrap();

        assert_eq!(value["name"], "Nelly-bot");
        assert_eq!(value["user"], 7);
        assert_eq!(value["egg"], 16);
        assert_eq!(value["docker_image"], "ghcr.io/parkervcp/yolks:python_3.12");
        assert_eq!(
            value["environment"],
            json!({
                "PY_FILE": "main.py",
                "REQUIREMENTS_FILE": "requirements.txt",
                "USER_UPLOAD": "1",
                "AUTO_UPDATE": "0",
                "PY_PACKAGES": ""
            })
        );
        assert_eq!(
            value["limits"],
            json!({ "memory": 200, "swap": 0, "disk": 500, "io": 500, "cpu": 20 })
        );
        assert_eq!(
            value["feature_limits"],
            json!({ "databases": 0, "allocations": 1, "backups": 0 })
        );
        assert_eq!(value["allocation"], json!({ "default": 42 }));
    }
}
