//! Company Application Service (Use Case)
//!
//! Tenant onboarding, admin login and profile maintenance.

use base64::Engine;
use rand::Rng;
use std::sync::Arc;
use uuid::Uuid;

use redress::{Company, CompanyRepository, DomainError};

/// Result of tenant onboarding. The plain admin password exists only in this
/// value; the stored record keeps a bcrypt hash.
#[derive(Debug)]
pub struct RegisteredCompany {
    pub company: Company,
    pub admin_username: String,
    pub admin_password: String,
    pub website_url: String,
    pub qr_code_base64: String,
}

/// Application service for Company operations
pub struct CompanyService<R: CompanyRepository> {
    repo: Arc<R>,
    public_base_url: String,
}

impl<R: CompanyRepository> CompanyService<R> {
    pub fn new(repo: Arc<R>, public_base_url: String) -> Self {
        Self {
            repo,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Onboard a new tenant with generated admin credentials.
    #[allow(clippy::too_many_arguments)]
    pub async fn register(
        &self,
        name: String,
        tagline: String,
        description: Option<String>,
        banner_color: Option<String>,
        industry: Option<String>,
        support_email: Option<String>,
        return_policy: String,
    ) -> Result<RegisteredCompany, DomainError> {
        let tagline = tagline.trim().to_lowercase();
        validate_tagline(&tagline)?;

        if self.repo.find_by_tagline(&tagline).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Tagline '{}' already exists",
                tagline
            )));
        }

        let admin_username = generate_admin_username();
        let admin_password = generate_admin_password();
        let password_hash = bcrypt::hash(&admin_password, bcrypt::DEFAULT_COST)
            .map_err(|e| DomainError::ExternalService(format!("Password hashing failed: {}", e)))?;

        let company = Company::new(
            name,
            tagline.clone(),
            description,
            banner_color,
            industry,
            support_email,
            return_policy,
            admin_username.clone(),
            password_hash,
        );

        let saved = self.repo.insert(&company).await?;

        let website_url = format!("{}/{}", self.public_base_url, tagline);
        let qr_code_base64 = qr_png_base64(&website_url)?;

        tracing::info!("Registered company: {} ({})", saved.name, saved.id);

        Ok(RegisteredCompany {
            company: saved,
            admin_username,
            admin_password,
            website_url,
            qr_code_base64,
        })
    }

    /// Verify tenant admin credentials. Returns None on any mismatch.
    pub async fn authenticate(
        &self,
        tagline: &str,
        username: &str,
        password: &str,
    ) -> Result<Option<Company>, DomainError> {
        let company = match self.repo.find_by_tagline(tagline).await? {
            Some(c) => c,
            None => return Ok(None),
        };

        if company.admin_username != username {
            return Ok(None);
        }

        let verified = bcrypt::verify(password, &company.admin_password_hash)
            .map_err(|e| DomainError::ExternalService(format!("Password check failed: {}", e)))?;

        Ok(verified.then_some(company))
    }

    /// Look up a tenant by ID
    pub async fn get(&self, id: Uuid) -> Result<Option<Company>, DomainError> {
        self.repo.find_by_id(id).await
    }

    /// Look up a tenant by its URL slug
    pub async fn get_by_tagline(&self, tagline: &str) -> Result<Option<Company>, DomainError> {
        self.repo.find_by_tagline(tagline).await
    }

    /// Replace a tenant's return policy text
    pub async fn update_policy(&self, id: Uuid, policy: &str) -> Result<Company, DomainError> {
        let updated = self.repo.update_policy(id, policy).await?;
        tracing::info!("Updated return policy for company {}", id);
        Ok(updated)
    }
}

fn validate_tagline(tagline: &str) -> Result<(), DomainError> {
    if tagline.is_empty() {
        return Err(DomainError::Validation("Tagline must not be empty".into()));
    }
    if !tagline
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(DomainError::Validation(
            "Tagline may only contain lowercase letters, digits and hyphens".into(),
        ));
    }
    Ok(())
}

fn generate_admin_username() -> String {
    let mut rng = rand::rng();
    let digits: String = (0..5)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect();
    format!("admin_{}", digits)
}

fn generate_admin_password() -> String {
    use rand::distr::Alphanumeric;
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

/// Render `data` as a grayscale QR PNG, base64-encoded for inlining.
fn qr_png_base64(data: &str) -> Result<String, DomainError> {
    const SCALE: usize = 8;
    const BORDER: usize = 4;

    let code = qrcode::QrCode::new(data.as_bytes())
        .map_err(|e| DomainError::Validation(format!("QR encoding failed: {}", e)))?;
    let width = code.width();
    let colors = code.to_colors();

    let size = (width + BORDER * 2) * SCALE;
    let mut pixels = vec![255u8; size * size];
    for y in 0..width {
        for x in 0..width {
            if colors[y * width + x] == qrcode::Color::Dark {
                for dy in 0..SCALE {
                    for dx in 0..SCALE {
                        let px = (x + BORDER) * SCALE + dx;
                        let py = (y + BORDER) * SCALE + dy;
                        pixels[py * size + px] = 0;
                    }
                }
            }
        }
    }

    let mut png_bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_bytes, size as u32, size as u32);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| DomainError::Validation(format!("PNG encoding failed: {}", e)))?;
        writer
            .write_image_data(&pixels)
            .map_err(|e| DomainError::Validation(format!("PNG encoding failed: {}", e)))?;
    }

    Ok(base64::engine::general_purpose::STANDARD.encode(&png_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MemCompanyRepository;

    fn service() -> CompanyService<MemCompanyRepository> {
        CompanyService::new(
            Arc::new(MemCompanyRepository::new()),
            "https://support.example.com/".to_string(),
        )
    }

    #[test]
    fn test_generated_credentials_shape() {
        let username = generate_admin_username();
        assert!(username.starts_with("admin_"));
        assert_eq!(username.len(), "admin_".len() + 5);

        let password = generate_admin_password();
        assert_eq!(password.len(), 12);
        assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tagline_validation() {
        assert!(validate_tagline("technova").is_ok());
        assert!(validate_tagline("cozy-wear-2").is_ok());
        assert!(validate_tagline("").is_err());
        assert!(validate_tagline("has space").is_err());
        assert!(validate_tagline("slash/y").is_err());
    }

    #[test]
    fn test_qr_is_valid_png() {
        let encoded = qr_png_base64("https://support.example.com/technova").unwrap();
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_builds_url() {
        let service = service();
        let registered = service
            .register(
                "TechNova".to_string(),
                "TechNova".to_string(), // mixed case gets slugged
                None,
                Some("#112233".to_string()),
                Some("electronics".to_string()),
                None,
                "Strict policy".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(registered.company.tagline, "technova");
        assert_eq!(
            registered.website_url,
            "https://support.example.com/technova"
        );
        assert_ne!(registered.company.admin_password_hash, registered.admin_password);
        assert!(bcrypt::verify(
            &registered.admin_password,
            &registered.company.admin_password_hash
        )
        .unwrap());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_tagline() {
        let service = service();
        service
            .register(
                "TechNova".to_string(),
                "technova".to_string(),
                None,
                None,
                None,
                None,
                "Policy".to_string(),
            )
            .await
            .unwrap();

        let err = service
            .register(
                "TechNova Again".to_string(),
                "technova".to_string(),
                None,
                None,
                None,
                None,
                "Policy".to_string(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_repeated_reads_return_identical_profile() {
        let service = service();
        service
            .register(
                "TechNova".to_string(),
                "technova".to_string(),
                None,
                None,
                None,
                None,
                "No refunds without sealed packaging.".to_string(),
            )
            .await
            .unwrap();

        let first = service.get_by_tagline("technova").await.unwrap().unwrap();
        let second = service.get_by_tagline("technova").await.unwrap().unwrap();
        assert_eq!(first.return_policy, "No refunds without sealed packaging.");
        assert_eq!(first.return_policy, second.return_policy);
        assert_eq!(first.id, second.id);

        assert!(service.get_by_tagline("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_authenticate() {
        let service = service();
        let registered = service
            .register(
                "CozyWear".to_string(),
                "cozywear".to_string(),
                None,
                None,
                None,
                None,
                "Lenient policy".to_string(),
            )
            .await
            .unwrap();

        let ok = service
            .authenticate(
                "cozywear",
                &registered.admin_username,
                &registered.admin_password,
            )
            .await
            .unwrap();
        assert!(ok.is_some());

        let bad_password = service
            .authenticate("cozywear", &registered.admin_username, "wrong")
            .await
            .unwrap();
        assert!(bad_password.is_none());

        let bad_tenant = service
            .authenticate("nobody", &registered.admin_username, &registered.admin_password)
            .await
            .unwrap();
        assert!(bad_tenant.is_none());
    }
}
