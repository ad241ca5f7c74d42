//! Staff-zone service contract and its HTTP implementation

use async_trait::async_trait;
use serde::Serialize;
use shared::models::{Staff, StaffZoneAssignment, StaffZoneCreate, StaffZoneMove, Zone};
use shared::{ListResult, ServiceResponse, ServiceResult};
use urlencoding::encode;

use crate::{ClientConfig, ClientResult, HttpClient};

/// Remote staff-zone operations.
///
/// Every method resolves to a tagged result: an explicit `success:false`
/// envelope and a transport failure both arrive as `Err`.
#[async_trait]
pub trait StaffZoneService: Send + Sync {
    async fn get_all_zones(&self) -> ServiceResult<Vec<Zone>>;

    async fn get_staff_by_zone_id(&self, zone_id: &str) -> ServiceResult<Vec<StaffZoneAssignment>>;

    async fn move_staff_to_zone(
        &self,
        assignment_id: &str,
        staff_id: &str,
        target_zone_id: &str,
    ) -> ServiceResult<()>;

    async fn delete_staff_zone(&self, assignment_id: &str, cascade: bool) -> ServiceResult<()>;

    async fn create_staff_zone(&self, staff_id: &str, zone_id: &str) -> ServiceResult<()>;

    /// All staff members, used to offer candidates when adding an assignment
    async fn get_all_staff(&self) -> ServiceResult<Vec<Staff>>;
}

#[derive(Serialize)]
struct CascadeQuery {
    cascade: bool,
}

/// [`StaffZoneService`] over the REST API
#[derive(Debug, Clone)]
pub struct HttpStaffZoneService {
    http: HttpClient,
}

impl HttpStaffZoneService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(config.build_http_client()?))
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    async fn list<T: serde::de::DeserializeOwned>(&self, path: &str) -> ServiceResult<Vec<T>> {
        let resp: ServiceResponse<ListResult<T>> = self.http.get(path).await?;
        Ok(resp.into_result()?.items)
    }
}

#[async_trait]
impl StaffZoneService for HttpStaffZoneService {
    async fn get_all_zones(&self) -> ServiceResult<Vec<Zone>> {
        self.list("api/zones").await
    }

    async fn get_staff_by_zone_id(&self, zone_id: &str) -> ServiceResult<Vec<StaffZoneAssignment>> {
        self.list(&format!("api/zones/{}/staff", encode(zone_id))).await
    }

    async fn move_staff_to_zone(
        &self,
        assignment_id: &str,
        staff_id: &str,
        target_zone_id: &str,
    ) -> ServiceResult<()> {
        let body = StaffZoneMove {
            staff_id: staff_id.to_string(),
            zone_id: target_zone_id.to_string(),
        };
        let resp: ServiceResponse<serde_json::Value> = self
            .http
            .put(&format!("api/staff-zones/{}/move", encode(assignment_id)), &body)
            .await?;
        resp.into_ack()
    }

    async fn delete_staff_zone(&self, assignment_id: &str, cascade: bool) -> ServiceResult<()> {
        let resp: ServiceResponse<serde_json::Value> = self
            .http
            .delete(
                &format!("api/staff-zones/{}", encode(assignment_id)),
                &CascadeQuery { cascade },
            )
            .await?;
        resp.into_ack()
    }

    async fn create_staff_zone(&self, staff_id: &str, zone_id: &str) -> ServiceResult<()> {
        let body = StaffZoneCreate {
            staff_id: staff_id.to_string(),
            zone_id: zone_id.to_string(),
        };
        let resp: ServiceResponse<serde_json::Value> =
            self.http.post("api/staff-zones", &body).await?;
        resp.into_ack()
    }

    async fn get_all_staff(&self) -> ServiceResult<Vec<Staff>> {
        self.list("api/staff").await
    }
}
