use std::sync::Arc;

use chrono::{DateTime, Utc};
use klima_core::{Config, PassArtifact, PassRequest};

use crate::archive::write_pkpass;
use crate::assembler::PassAssembler;
use crate::error::PassError;
use crate::fields::FieldLabels;
use crate::manifest::build_manifest;
use crate::signing::{CertificateBundle, CmsPassSigner, PassSigner};
use crate::template::PassTemplate;
use crate::PASS_JSON_FILE;

/// Request to signed archive: assemble, digest, sign, zip.
///
/// Holds only shared read-only state, so one pipeline serves concurrent
/// requests.
#[derive(Clone)]
pub struct PassPipeline {
    assembler: PassAssembler,
    signer: Arc<dyn PassSigner>,
}

impl std::fmt::Debug for PassPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassPipeline")
            .field("assembler", &self.assembler)
            .field("signer", &self.signer.signer_name())
            .finish()
    }
}

impl PassPipeline {
    pub fn new(assembler: PassAssembler, signer: Arc<dyn PassSigner>) -> Self {
        Self { assembler, signer }
    }

    /// Load the certificates and pass model named by `config` and sign with CMS.
    pub fn from_config(config: &Config) -> Result<Self, PassError> {
        let bundle = CertificateBundle::load(
            config.wwdr_cert_path(),
            config.signer_cert_path(),
            config.signer_key_path(),
        )?;
        let template = PassTemplate::load(config.pass_model_dir())?;
        let assembler = PassAssembler::new(
            Arc::new(template),
            FieldLabels::for_locale(config.label_locale()),
        );
        Ok(Self::new(assembler, Arc::new(CmsPassSigner::new(bundle))))
    }

    pub fn assembler(&self) -> &PassAssembler {
        &self.assembler
    }

    pub fn signer(&self) -> &dyn PassSigner {
        self.signer.as_ref()
    }

    pub fn issue(
        &self,
        request: &PassRequest,
        issued_at: DateTime<Utc>,
    ) -> Result<PassArtifact, PassError> {
        let contents = self.assembler.assemble(request, issued_at)?;
        let style = contents.style().unwrap_or_default().to_string();

        let mut files = contents.files;
        files.insert(
            PASS_JSON_FILE.to_string(),
            serde_json::to_vec(&contents.pass_json)?,
        );

        let manifest = build_manifest(&files)?;
        let signature = self.signer.sign_manifest(&manifest)?;
        let archive = write_pkpass(&files, &manifest, &signature)?;

        tracing::info!(
            serial_number = %contents.serial_number,
            style = %style,
            files = files.len() + 2,
            size_bytes = archive.len(),
            "Pass issued"
        );

        Ok(PassArtifact::pkpass(contents.serial_number, archive))
    }
}
