//! Resolution of polymorphic auditable references.

use grc_core::entities::{Auditable, Control, Implementation};
use grc_core::enums::AuditableKind;

use crate::error::DatabaseError;
use crate::service::GrcService;

/// The entity an [`Auditable`] reference points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditableTarget {
    Control(Control),
    Implementation(Implementation),
}

impl AuditableTarget {
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Control(c) => &c.code,
            Self::Implementation(i) => &i.code,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Control(c) => &c.title,
            Self::Implementation(i) => &i.title,
        }
    }

    #[must_use]
    pub fn auditable(&self) -> Auditable {
        match self {
            Self::Control(c) => Auditable::control(&c.id),
            Self::Implementation(i) => Auditable::implementation(&i.id),
        }
    }
}

impl GrcService {
    /// Load the control or implementation behind `auditable`.
    ///
    /// # Errors
    ///
    /// `DatabaseError::NoResult` if the referenced row does not exist.
    pub async fn resolve_auditable(
        &self,
        auditable: &Auditable,
    ) -> Result<AuditableTarget, DatabaseError> {
        match auditable.kind {
            AuditableKind::Control => Ok(AuditableTarget::Control(
                self.get_control(&auditable.id).await?,
            )),
            AuditableKind::Implementation => Ok(AuditableTarget::Implementation(
                self.get_implementation(&auditable.id).await?,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{seed_control, seed_implementation, seed_standard, test_service};

    #[tokio::test]
    async fn resolves_both_kinds() {
        let svc = test_service().await;
        let standard = seed_standard(&svc, "SOC2").await;
        let control = seed_control(&svc, &standard.id, "CC6.1").await;
        let imp = seed_implementation(&svc, "IMP-1").await;

        let c = svc
            .resolve_auditable(&Auditable::control(&control.id))
            .await
            .unwrap();
        assert_eq!(c.code(), "CC6.1");
        assert_eq!(c.auditable(), Auditable::control(&control.id));

        let i = svc
            .resolve_auditable(&Auditable::implementation(&imp.id))
            .await
            .unwrap();
        assert_eq!(i.title(), imp.title);
    }

    #[tokio::test]
    async fn kind_mismatch_is_not_found() {
        let svc = test_service().await;
        let imp = seed_implementation(&svc, "IMP-1").await;
        let result = svc.resolve_auditable(&Auditable::control(&imp.id)).await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }
}
