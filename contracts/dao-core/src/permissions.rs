use cosmwasm_std::{Addr, Api, Binary, Deps, Env, Event, StdResult, Storage};
use dao_interface::{
    authorizer::AuthorizerQueryMsg,
    permissions::{ANY_ADDR, ROOT_PERMISSION},
    state::PermissionAuthorizer,
};

use crate::error::ContractError;
use crate::state::PERMISSIONS;

/// Validates a bearer, letting the wildcard through.
pub fn validate_bearer(api: &dyn Api, bearer: &str) -> StdResult<Addr> {
    if bearer == ANY_ADDR {
        Ok(Addr::unchecked(ANY_ADDR))
    } else {
        api.addr_validate(bearer)
    }
}

/// Whether `bearer` holds `permission_id` on `target`.
///
/// An exact bearer record decides on its own when one exists, even if
/// its authorizer declines. Otherwise the wildcard record is used. A
/// failing authorizer query counts as a denial.
pub fn has_permission(
    deps: Deps,
    target: &Addr,
    bearer: &Addr,
    permission_id: &str,
    data: Option<Binary>,
) -> StdResult<bool> {
    let any = Addr::unchecked(ANY_ADDR);
    let record = match PERMISSIONS.may_load(deps.storage, (target, permission_id, bearer))? {
        Some(record) => Some(record),
        None => PERMISSIONS.may_load(deps.storage, (target, permission_id, &any))?,
    };

    Ok(match record {
        None => false,
        Some(PermissionAuthorizer::Allow {}) => true,
        Some(PermissionAuthorizer::Authorizer { addr }) => deps
            .querier
            .query_wasm_smart(
                addr,
                &AuthorizerQueryMsg::IsAuthorized {
                    target: target.to_string(),
                    bearer: bearer.to_string(),
                    permission_id: permission_id.to_string(),
                    data,
                },
            )
            .unwrap_or(false),
    })
}

/// Errors unless `sender` holds `permission_id` on the DAO itself.
pub(crate) fn assert_permission(
    deps: Deps,
    env: &Env,
    sender: &Addr,
    permission_id: &str,
) -> Result<(), ContractError> {
    if has_permission(deps, &env.contract.address, sender, permission_id, None)? {
        Ok(())
    } else {
        Err(ContractError::Unauthorized {
            permission_id: permission_id.to_string(),
        })
    }
}

/// Errors unless `sender` may change permissions on `target`, which
/// takes root on the target or on the DAO.
pub(crate) fn assert_can_manage(
    deps: Deps,
    env: &Env,
    sender: &Addr,
    target: &Addr,
) -> Result<(), ContractError> {
    if has_permission(deps, target, sender, ROOT_PERMISSION, None)?
        || has_permission(deps, &env.contract.address, sender, ROOT_PERMISSION, None)?
    {
        Ok(())
    } else {
        Err(ContractError::Unauthorized {
            permission_id: ROOT_PERMISSION.to_string(),
        })
    }
}

/// Stores a permission record. Returns the event to emit, or None if
/// the identical record already exists.
pub(crate) fn grant(
    storage: &mut dyn Storage,
    target: &Addr,
    permission_id: &str,
    bearer: &Addr,
    authorizer: PermissionAuthorizer,
    granted_by: &Addr,
) -> Result<Option<Event>, ContractError> {
    if permission_id == ROOT_PERMISSION && bearer.as_str() == ANY_ADDR {
        return Err(ContractError::RootForAnyone {});
    }
    let key = (target, permission_id, bearer);
    match PERMISSIONS.may_load(storage, key)? {
        Some(current) if current == authorizer => Ok(None),
        Some(current) => Err(ContractError::PermissionAlreadySet {
            permission_id: permission_id.to_string(),
            current: current.to_string(),
        }),
        None => {
            PERMISSIONS.save(storage, key, &authorizer)?;
            Ok(Some(
                Event::new("granted")
                    .add_attribute("permission_id", permission_id)
                    .add_attribute("granted_by", granted_by)
                    .add_attribute("target", target)
                    .add_attribute("bearer", bearer)
                    .add_attribute("authorizer", authorizer.to_string()),
            ))
        }
    }
}

/// Removes a permission record. Returns the event to emit, or None if
/// there was nothing to remove.
pub(crate) fn revoke(
    storage: &mut dyn Storage,
    target: &Addr,
    permission_id: &str,
    bearer: &Addr,
    revoked_by: &Addr,
) -> Result<Option<Event>, ContractError> {
    let key = (target, permission_id, bearer);
    if !PERMISSIONS.has(storage, key) {
        return Ok(None);
    }
    PERMISSIONS.remove(storage, key);
    Ok(Some(
        Event::new("revoked")
            .add_attribute("permission_id", permission_id)
            .add_attribute("revoked_by", revoked_by)
            .add_attribute("target", target)
            .add_attribute("bearer", bearer),
    ))
}
