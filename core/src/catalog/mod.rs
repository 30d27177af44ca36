//! Mock service catalog: published listings, provider advertisements, and
//! appointment requests.
//!
//! Everything is seeded, in-memory data; the only state transitions are the
//! admin's active/inactive toggle on advertisements and the provider's
//! confirm/decline response to a pending appointment.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Advertisement not found: {0}")]
    AdvertisementNotFound(String),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error("Appointment {0} has already been resolved")]
    AlreadyResolved(String),
}

/// A published service as the client search sees it.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceListing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub provider: String,
    pub rating: f32,
    pub price: String,
    pub location: String,
}

/// Advertisement lifecycle on the provider/admin side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Inactive,
    Pending,
}

/// A provider's advertisement with its engagement counters.
#[derive(Debug, Clone, Serialize)]
pub struct Advertisement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub provider: String,
    pub status: ListingStatus,
    pub views: u64,
    pub messages: u64,
    pub created_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Declined,
}

/// An appointment request between a client and a provider.
#[derive(Debug, Clone, Serialize)]
pub struct Appointment {
    pub id: String,
    pub client_name: String,
    pub service: String,
    pub provider: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
}

/// Aggregates for the provider dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderStats {
    pub active_ads: usize,
    pub total_views: u64,
    pub total_messages: u64,
    pub pending_appointments: usize,
}

/// In-memory service catalog
pub struct Catalog {
    listings: RwLock<Vec<ServiceListing>>,
    advertisements: RwLock<Vec<Advertisement>>,
    appointments: RwLock<Vec<Appointment>>,
}

impl Catalog {
    /// Catalog seeded with the canonical mock data.
    pub fn new() -> Self {
        Self {
            listings: RwLock::new(seed_listings()),
            advertisements: RwLock::new(seed_advertisements()),
            appointments: RwLock::new(seed_appointments()),
        }
    }

    /// Case-insensitive substring search over listing title and description.
    /// An empty term matches every listing.
    pub async fn search_listings(&self, term: &str) -> Vec<ServiceListing> {
        let needle = term.to_lowercase();
        self.listings
            .read()
            .await
            .iter()
            .filter(|s| {
                s.title.to_lowercase().contains(&needle)
                    || s.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    pub async fn advertisements(&self) -> Vec<Advertisement> {
        self.advertisements.read().await.clone()
    }

    pub async fn appointments(&self) -> Vec<Appointment> {
        self.appointments.read().await.clone()
    }

    /// Admin action: flip an advertisement between active and inactive.
    /// A pending advertisement is approved straight to active.
    pub async fn toggle_ad_status(&self, ad_id: &str) -> Result<ListingStatus, CatalogError> {
        let mut ads = self.advertisements.write().await;
        let ad = ads
            .iter_mut()
            .find(|a| a.id == ad_id)
            .ok_or_else(|| CatalogError::AdvertisementNotFound(ad_id.to_string()))?;

        ad.status = match ad.status {
            ListingStatus::Active => ListingStatus::Inactive,
            ListingStatus::Inactive | ListingStatus::Pending => ListingStatus::Active,
        };
        info!("Advertisement '{}' is now {:?}", ad.title, ad.status);
        Ok(ad.status)
    }

    /// Provider action: confirm or decline a pending appointment request.
    pub async fn respond_to_appointment(
        &self,
        appointment_id: &str,
        accept: bool,
    ) -> Result<AppointmentStatus, CatalogError> {
        let mut appointments = self.appointments.write().await;
        let appointment = appointments
            .iter_mut()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| CatalogError::AppointmentNotFound(appointment_id.to_string()))?;

        if appointment.status != AppointmentStatus::Pending {
            return Err(CatalogError::AlreadyResolved(appointment_id.to_string()));
        }

        appointment.status = if accept {
            AppointmentStatus::Confirmed
        } else {
            AppointmentStatus::Declined
        };
        info!(
            "Appointment {} for {} is now {:?}",
            appointment.id, appointment.client_name, appointment.status
        );
        Ok(appointment.status)
    }

    pub async fn provider_stats(&self) -> ProviderStats {
        let ads = self.advertisements.read().await;
        let appointments = self.appointments.read().await;

        ProviderStats {
            active_ads: ads
                .iter()
                .filter(|a| a.status == ListingStatus::Active)
                .count(),
            total_views: ads.iter().map(|a| a.views).sum(),
            total_messages: ads.iter().map(|a| a.messages).sum(),
            pending_appointments: appointments
                .iter()
                .filter(|a| a.status == AppointmentStatus::Pending)
                .count(),
        }
    }

    pub async fn active_ad_count(&self) -> usize {
        self.advertisements
            .read()
            .await
            .iter()
            .filter(|a| a.status == ListingStatus::Active)
            .count()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_listings() -> Vec<ServiceListing> {
    vec![
        ServiceListing {
            id: "1".to_string(),
            title: "Limpeza Residencial".to_string(),
            description: "Serviço completo de limpeza para sua casa".to_string(),
            provider: "Maria Santos".to_string(),
            rating: 4.8,
            price: "R$ 80/h".to_string(),
            location: "São Paulo, SP".to_string(),
        },
        ServiceListing {
            id: "2".to_string(),
            title: "Consultoria em TI".to_string(),
            description: "Consultoria especializada em tecnologia".to_string(),
            provider: "Pedro Costa".to_string(),
            rating: 4.9,
            price: "R$ 150/h".to_string(),
            location: "São Paulo, SP".to_string(),
        },
        ServiceListing {
            id: "3".to_string(),
            title: "Aulas de Inglês".to_string(),
            description: "Aulas particulares de inglês online".to_string(),
            provider: "Ana Silva".to_string(),
            rating: 4.7,
            price: "R$ 60/h".to_string(),
            location: "Online".to_string(),
        },
    ]
}

fn seed_advertisements() -> Vec<Advertisement> {
    const JAN_2024: u64 = 1_704_067_200_000;
    const DAY: u64 = 24 * 60 * 60 * 1000;

    vec![
        Advertisement {
            id: "1".to_string(),
            title: "Limpeza Residencial".to_string(),
            description: "Serviço completo de limpeza domiciliar".to_string(),
            provider: "Maria Santos".to_string(),
            status: ListingStatus::Active,
            views: 45,
            messages: 8,
            created_at: JAN_2024 + 11 * DAY,
        },
        Advertisement {
            id: "2".to_string(),
            title: "Consultoria em TI".to_string(),
            description: "Consultoria especializada em tecnologia".to_string(),
            provider: "Pedro Costa".to_string(),
            status: ListingStatus::Pending,
            views: 12,
            messages: 3,
            created_at: JAN_2024 + 14 * DAY,
        },
    ]
}

fn seed_appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            id: "1".to_string(),
            client_name: "João Silva".to_string(),
            service: "Limpeza Residencial".to_string(),
            provider: "Maria Santos".to_string(),
            date: "2024-01-20".to_string(),
            time: "14:00".to_string(),
            status: AppointmentStatus::Pending,
        },
        Appointment {
            id: "2".to_string(),
            client_name: "Ana Costa".to_string(),
            service: "Limpeza Residencial".to_string(),
            provider: "Maria Santos".to_string(),
            date: "2024-01-22".to_string(),
            time: "09:00".to_string(),
            status: AppointmentStatus::Confirmed,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_listings_by_title_and_description() {
        let catalog = Catalog::new();

        let by_title = catalog.search_listings("limpeza").await;
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].provider, "Maria Santos");

        let by_description = catalog.search_listings("tecnologia").await;
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].title, "Consultoria em TI");

        assert_eq!(catalog.search_listings("").await.len(), 3);
        assert!(catalog.search_listings("encanamento").await.is_empty());
    }

    #[tokio::test]
    async fn test_toggle_ad_status() {
        let catalog = Catalog::new();

        let status = catalog.toggle_ad_status("1").await.unwrap();
        assert_eq!(status, ListingStatus::Inactive);

        let status = catalog.toggle_ad_status("1").await.unwrap();
        assert_eq!(status, ListingStatus::Active);
    }

    #[tokio::test]
    async fn test_toggle_approves_pending_ad() {
        let catalog = Catalog::new();

        // Ad 2 is seeded pending; toggling approves it
        let status = catalog.toggle_ad_status("2").await.unwrap();
        assert_eq!(status, ListingStatus::Active);
        assert_eq!(catalog.active_ad_count().await, 2);
    }

    #[tokio::test]
    async fn test_toggle_unknown_ad() {
        let catalog = Catalog::new();
        let result = catalog.toggle_ad_status("99").await;
        assert!(matches!(
            result,
            Err(CatalogError::AdvertisementNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_respond_to_pending_appointment() {
        let catalog = Catalog::new();

        let status = catalog.respond_to_appointment("1", true).await.unwrap();
        assert_eq!(status, AppointmentStatus::Confirmed);

        // A resolved appointment cannot be answered again
        let result = catalog.respond_to_appointment("1", false).await;
        assert!(matches!(result, Err(CatalogError::AlreadyResolved(_))));
    }

    #[tokio::test]
    async fn test_decline_appointment() {
        let catalog = Catalog::new();

        let status = catalog.respond_to_appointment("1", false).await.unwrap();
        assert_eq!(status, AppointmentStatus::Declined);
        assert_eq!(catalog.provider_stats().await.pending_appointments, 0);
    }

    #[tokio::test]
    async fn test_respond_to_already_confirmed_appointment() {
        let catalog = Catalog::new();
        // Appointment 2 is seeded confirmed
        let result = catalog.respond_to_appointment("2", true).await;
        assert!(matches!(result, Err(CatalogError::AlreadyResolved(_))));
    }

    #[tokio::test]
    async fn test_respond_to_unknown_appointment() {
        let catalog = Catalog::new();
        let result = catalog.respond_to_appointment("99", true).await;
        assert!(matches!(result, Err(CatalogError::AppointmentNotFound(_))));
    }

    #[tokio::test]
    async fn test_provider_stats() {
        let catalog = Catalog::new();
        let stats = catalog.provider_stats().await;

        assert_eq!(stats.active_ads, 1);
        assert_eq!(stats.total_views, 57);
        assert_eq!(stats.total_messages, 11);
        assert_eq!(stats.pending_appointments, 1);
    }
}
