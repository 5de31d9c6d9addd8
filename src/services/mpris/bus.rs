use std::collections::HashMap;

use async_trait::async_trait;
use futures::{StreamExt, stream::BoxStream};
use tracing::{error, info, instrument, warn};
use zbus::{Connection, Proxy, fdo, names::BusName, zvariant::OwnedValue};

use super::{
    MediaError, MediaPlayerV1Proxy, OwnerChange, PlayerAddress, PlayerEvent, PlayerStatus,
    PropertyChanges, SignalKind, TrackMetadata,
};

const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// Arguments of a received signal, or [`MediaError::MalformedPayload`] when they do not
/// have the declared shape
fn decode<T>(member: &str, args: zbus::Result<T>) -> Result<T, MediaError> {
    args.map_err(|e| MediaError::MalformedPayload {
        member: member.to_string(),
        details: e.to_string(),
    })
}

/// Notifications from one subscription, already decoded
pub type EventStream = BoxStream<'static, PlayerEvent>;

/// `NameOwnerChanged` notifications from the bus daemon
pub type OwnerChangeStream = BoxStream<'static, OwnerChange>;

/// Primitive operations on the session bus
///
/// Everything above this trait is bus-agnostic; tests drive the controller through an
/// in-memory implementation.
#[async_trait]
pub trait MediaBus: Send + Sync + 'static {
    /// Every name currently registered on the bus
    async fn list_names(&self) -> Result<Vec<String>, MediaError>;

    /// Whether a bus name currently has an owner
    async fn name_has_owner(&self, service: &str) -> Result<bool, MediaError>;

    /// Fire-and-forget method call with no arguments
    async fn call(&self, address: &PlayerAddress, method: &str) -> Result<(), MediaError>;

    /// v1 `GetMetadata`
    async fn legacy_metadata(&self, address: &PlayerAddress) -> Result<TrackMetadata, MediaError>;

    /// v1 `GetStatus`
    async fn legacy_status(&self, address: &PlayerAddress) -> Result<PlayerStatus, MediaError>;

    /// All properties of the address's interface, decoded like a `PropertiesChanged` payload
    async fn player_properties(
        &self,
        address: &PlayerAddress,
    ) -> Result<PropertyChanges, MediaError>;

    /// Register for one notification class of the object at `address`
    async fn subscribe(
        &self,
        address: &PlayerAddress,
        signal: SignalKind,
    ) -> Result<EventStream, MediaError>;

    /// Register for bus name ownership changes
    async fn owner_changes(&self) -> Result<OwnerChangeStream, MediaError>;
}

/// [`MediaBus`] over a zbus session connection
///
/// Starts detached when no session bus is reachable; every operation then fails with
/// [`MediaError::BusUnavailable`].
#[derive(Clone)]
pub struct ZbusMediaBus {
    connection: Option<Connection>,
    unavailable_reason: String,
}

impl ZbusMediaBus {
    /// Connect to the session bus
    #[instrument]
    pub async fn connect_session() -> Self {
        match Connection::session().await {
            Ok(connection) => {
                info!("Connected to session bus");
                Self::with_connection(connection)
            }
            Err(e) => {
                error!("Cannot connect to the D-Bus session bus: {e}");
                Self {
                    connection: None,
                    unavailable_reason: e.to_string(),
                }
            }
        }
    }

    /// Wrap an existing connection
    pub fn with_connection(connection: Connection) -> Self {
        Self {
            connection: Some(connection),
            unavailable_reason: String::new(),
        }
    }

    /// Whether a bus connection exists
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn connection(&self) -> Result<&Connection, MediaError> {
        self.connection
            .as_ref()
            .ok_or_else(|| MediaError::BusUnavailable(self.unavailable_reason.clone()))
    }

    async fn dbus(&self) -> Result<fdo::DBusProxy<'static>, MediaError> {
        Ok(fdo::DBusProxy::new(self.connection()?).await?)
    }

    async fn proxy(
        &self,
        address: &PlayerAddress,
        interface: &'static str,
    ) -> Result<Proxy<'static>, MediaError> {
        Proxy::new(
            self.connection()?,
            address.service.clone(),
            address.path,
            interface,
        )
        .await
        .map_err(MediaError::DbusError)
    }

    async fn v1_proxy(
        &self,
        address: &PlayerAddress,
    ) -> Result<MediaPlayerV1Proxy<'static>, MediaError> {
        MediaPlayerV1Proxy::builder(self.connection()?)
            .destination(address.service.clone())
            .map_err(MediaError::DbusError)?
            .path(address.path)
            .map_err(MediaError::DbusError)?
            .build()
            .await
            .map_err(MediaError::DbusError)
    }

    async fn properties_proxy(
        &self,
        address: &PlayerAddress,
    ) -> Result<fdo::PropertiesProxy<'static>, MediaError> {
        fdo::PropertiesProxy::builder(self.connection()?)
            .destination(address.service.clone())
            .map_err(MediaError::DbusError)?
            .path(address.path)
            .map_err(MediaError::DbusError)?
            .build()
            .await
            .map_err(MediaError::DbusError)
    }

    async fn track_changes(&self, address: &PlayerAddress) -> Result<EventStream, MediaError> {
        let stream = self
            .v1_proxy(address)
            .await?
            .receive_track_change()
            .await
            .map_err(MediaError::DbusError)?;

        Ok(stream
            .filter_map(|signal| async move {
                let args = decode("TrackChange", signal.args())
                    .inspect_err(|e| warn!("{e}"))
                    .ok()?;
                Some(PlayerEvent::TrackChanged(TrackMetadata::from(
                    args.metadata(),
                )))
            })
            .boxed())
    }

    async fn status_changes(&self, address: &PlayerAddress) -> Result<EventStream, MediaError> {
        let stream = self
            .v1_proxy(address)
            .await?
            .receive_status_change()
            .await
            .map_err(MediaError::DbusError)?;

        Ok(stream
            .filter_map(|signal| async move {
                let args = decode("StatusChange", signal.args())
                    .inspect_err(|e| warn!("{e}"))
                    .ok()?;
                Some(PlayerEvent::StatusChanged(PlayerStatus::from_wire(
                    *args.status(),
                )))
            })
            .boxed())
    }

    async fn property_changes(&self, address: &PlayerAddress) -> Result<EventStream, MediaError> {
        let interface = address.interface;
        let stream = self
            .properties_proxy(address)
            .await?
            .receive_properties_changed()
            .await?;

        Ok(stream
            .filter_map(move |signal| async move {
                let args = decode("PropertiesChanged", signal.args())
                    .inspect_err(|e| warn!("{e}"))
                    .ok()?;
                if args.interface_name().as_str() != interface {
                    return None;
                }

                let mut changes = PropertyChanges::default();
                for (name, value) in args.changed_properties() {
                    changes.record(name, value);
                }
                Some(PlayerEvent::PropertiesChanged(changes))
            })
            .boxed())
    }
}

#[async_trait]
impl MediaBus for ZbusMediaBus {
    async fn list_names(&self) -> Result<Vec<String>, MediaError> {
        let names = self.dbus().await?.list_names().await?;
        Ok(names.into_iter().map(|name| name.to_string()).collect())
    }

    async fn name_has_owner(&self, service: &str) -> Result<bool, MediaError> {
        let name = BusName::try_from(service).map_err(|e| MediaError::DbusError(e.into()))?;
        Ok(self.dbus().await?.name_has_owner(name).await?)
    }

    async fn call(&self, address: &PlayerAddress, method: &str) -> Result<(), MediaError> {
        self.proxy(address, address.interface)
            .await?
            .call_noreply(method, &())
            .await
            .map_err(MediaError::DbusError)
    }

    async fn legacy_metadata(&self, address: &PlayerAddress) -> Result<TrackMetadata, MediaError> {
        let metadata = self
            .v1_proxy(address)
            .await?
            .get_metadata()
            .await
            .map_err(MediaError::DbusError)?;
        Ok(TrackMetadata::from(&metadata))
    }

    async fn legacy_status(&self, address: &PlayerAddress) -> Result<PlayerStatus, MediaError> {
        self.v1_proxy(address)
            .await?
            .get_status()
            .await
            .map(PlayerStatus::from_wire)
            .map_err(MediaError::DbusError)
    }

    async fn player_properties(
        &self,
        address: &PlayerAddress,
    ) -> Result<PropertyChanges, MediaError> {
        let properties: HashMap<String, OwnedValue> = self
            .proxy(address, PROPERTIES_INTERFACE)
            .await?
            .call("GetAll", &(address.interface,))
            .await
            .map_err(MediaError::DbusError)?;

        let mut changes = PropertyChanges::default();
        for (name, value) in &properties {
            changes.record(name, value);
        }
        Ok(changes)
    }

    async fn subscribe(
        &self,
        address: &PlayerAddress,
        signal: SignalKind,
    ) -> Result<EventStream, MediaError> {
        let stream = match signal {
            SignalKind::TrackChange => self.track_changes(address).await,
            SignalKind::StatusChange => self.status_changes(address).await,
            SignalKind::PropertiesChanged => self.property_changes(address).await,
        };

        stream.map_err(|e| MediaError::SubscriptionFailed {
            signal: signal.member().to_string(),
            service: address.service.clone(),
            details: e.to_string(),
        })
    }

    async fn owner_changes(&self) -> Result<OwnerChangeStream, MediaError> {
        let stream = self
            .dbus()
            .await?
            .receive_name_owner_changed()
            .await?;

        Ok(stream
            .filter_map(|signal| async move {
                let args = decode("NameOwnerChanged", signal.args())
                    .inspect_err(|e| warn!("{e}"))
                    .ok()?;
                let owner = |owner: Option<&str>| owner.map(str::to_string).unwrap_or_default();
                Some(OwnerChange::new(
                    args.name().to_string(),
                    owner(args.old_owner().as_deref()),
                    owner(args.new_owner().as_deref()),
                ))
            })
            .boxed())
    }
}
