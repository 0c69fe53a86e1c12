use super::*;

/// Role based permissions of a contract instance.
#[derive(Debug, Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct AccessControl<S: HasStateApi> {
    /// Addresses holding every role. Only admins can grant and revoke roles
    admins: StateSet<Address, S>,
    /// Addresses allowed to maintain price feeds
    feed_managers: StateSet<Address, S>,
}

impl<S: HasStateApi> AccessControl<S> {
    pub fn new(state_builder: &mut StateBuilder<S>, admin: Address) -> Self {
        let mut admins = state_builder.new_set();
        admins.insert(admin);
        Self {
            admins,
            feed_managers: state_builder.new_set(),
        }
    }

    pub fn has_role(&self, address: &Address, role: Role) -> bool {
        match role {
            Role::Admin => self.admins.contains(address),
            Role::FeedManager => {
                self.feed_managers.contains(address) || self.admins.contains(address)
            }
        }
    }

    pub fn ensure_role(&self, address: &Address, role: Role) -> Result<(), CustomContractError> {
        ensure!(
            self.has_role(address, role),
            CustomContractError::Unauthorized
        );
        Ok(())
    }

    pub fn handle_update(
        &mut self,
        sender: Address,
        update: &RoleUpdateParams,
    ) -> Result<(), CustomContractError> {
        self.ensure_role(&sender, Role::Admin)?;

        let members = match update.role {
            Role::Admin => &mut self.admins,
            Role::FeedManager => &mut self.feed_managers,
        };

        match update.kind {
            RoleUpdateKind::Revoke => {
                members.remove(&update.address);
            }
            RoleUpdateKind::Grant => {
                members.insert(update.address);
            }
        }

        Ok(())
    }

    pub fn handle_view(&self, view: RoleViewParams) -> Vec<Address> {
        let members = match view.role {
            Role::Admin => &self.admins,
            Role::FeedManager => &self.feed_managers,
        };

        members
            .iter()
            .skip(view.skip as usize)
            .take(view.show as usize)
            .map(|a| *a)
            .collect()
    }
}

#[derive(Debug, SchemaType, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    FeedManager,
}

#[derive(Debug, SchemaType, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum RoleUpdateKind {
    Revoke,
    Grant,
}

#[derive(Debug, SchemaType, Serialize)]
pub struct RoleUpdateParams {
    pub role: Role,
    pub kind: RoleUpdateKind,
    pub address: Address,
}

#[derive(Debug, SchemaType, Serialize)]
pub struct RoleViewParams {
    pub role: Role,
    pub skip: u32,
    pub show: u32,
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const ADMIN: AccountAddress = AccountAddress([1; 32]);
    const MANAGER: AccountAddress = AccountAddress([2; 32]);
    const MANAGER_CONTRACT: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };
    const USER: AccountAddress = AccountAddress([16; 32]);

    fn default_access() -> AccessControl<TestStateApi> {
        let mut state_builder = TestStateBuilder::new();
        let mut access = AccessControl::new(&mut state_builder, Address::Account(ADMIN));
        access.feed_managers.insert(Address::Account(MANAGER));
        access
            .feed_managers
            .insert(Address::Contract(MANAGER_CONTRACT));
        access
    }

    fn update(role: Role, kind: RoleUpdateKind, address: Address) -> RoleUpdateParams {
        RoleUpdateParams {
            role,
            kind,
            address,
        }
    }

    #[concordium_test]
    fn test_admin_holds_every_role() {
        let access = default_access();

        claim!(access.has_role(&Address::Account(ADMIN), Role::Admin));
        claim!(access.has_role(&Address::Account(ADMIN), Role::FeedManager));
        claim!(!access.has_role(&Address::Account(MANAGER), Role::Admin));
        claim!(access.has_role(&Address::Account(MANAGER), Role::FeedManager));
        claim!(access.has_role(&Address::Contract(MANAGER_CONTRACT), Role::FeedManager));
        claim!(!access.has_role(&Address::Account(USER), Role::FeedManager));
        claim_eq!(
            access.ensure_role(&Address::Account(USER), Role::FeedManager),
            Err(CustomContractError::Unauthorized)
        );
    }

    #[concordium_test]
    fn test_grant_roles() {
        let mut access = default_access();

        let result = access.handle_update(
            Address::Account(ADMIN),
            &update(
                Role::FeedManager,
                RoleUpdateKind::Grant,
                Address::Account(USER),
            ),
        );
        claim_eq!(result, Ok(()));
        claim!(access.has_role(&Address::Account(USER), Role::FeedManager));
        claim!(!access.has_role(&Address::Account(USER), Role::Admin));

        let result = access.handle_update(
            Address::Account(ADMIN),
            &update(Role::Admin, RoleUpdateKind::Grant, Address::Account(USER)),
        );
        claim_eq!(result, Ok(()));
        claim!(access.has_role(&Address::Account(USER), Role::Admin));

        // Granting twice is a no-op
        let result = access.handle_update(
            Address::Account(USER),
            &update(Role::Admin, RoleUpdateKind::Grant, Address::Account(ADMIN)),
        );
        claim_eq!(result, Ok(()));
        claim!(access.has_role(&Address::Account(ADMIN), Role::Admin));
    }

    #[concordium_test]
    fn test_only_admin_updates_roles() {
        let mut access = default_access();

        let result = access.handle_update(
            Address::Account(MANAGER),
            &update(
                Role::FeedManager,
                RoleUpdateKind::Grant,
                Address::Account(USER),
            ),
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim!(!access.has_role(&Address::Account(USER), Role::FeedManager));

        let result = access.handle_update(
            Address::Contract(MANAGER_CONTRACT),
            &update(Role::Admin, RoleUpdateKind::Revoke, Address::Account(ADMIN)),
        );
        claim_eq!(result, Err(CustomContractError::Unauthorized));
        claim!(access.has_role(&Address::Account(ADMIN), Role::Admin));
    }

    #[concordium_test]
    fn test_revoke_roles() {
        let mut access = default_access();

        let result = access.handle_update(
            Address::Account(ADMIN),
            &update(
                Role::FeedManager,
                RoleUpdateKind::Revoke,
                Address::Account(MANAGER),
            ),
        );
        claim_eq!(result, Ok(()));
        claim!(!access.has_role(&Address::Account(MANAGER), Role::FeedManager));

        // Revoking a missing member is a no-op
        let result = access.handle_update(
            Address::Account(ADMIN),
            &update(
                Role::FeedManager,
                RoleUpdateKind::Revoke,
                Address::Account(USER),
            ),
        );
        claim_eq!(result, Ok(()));
    }

    #[concordium_test]
    fn test_view_roles() {
        let mut access = default_access();

        let mut managers = (16u8..=200u8)
            .map(|n| Address::Account(AccountAddress([n; 32])))
            .chain([
                Address::Account(MANAGER),
                Address::Contract(MANAGER_CONTRACT),
            ])
            .collect::<HashSet<_>>();

        for manager in managers.iter() {
            access.feed_managers.insert(*manager);
        }

        let mut num_seen = 0;
        let increment = 25;
        loop {
            let page = access.handle_view(RoleViewParams {
                role: Role::FeedManager,
                skip: num_seen,
                show: increment,
            });

            for addr in page.iter() {
                claim!(managers.remove(addr));
            }

            if page.len() != increment as usize {
                break;
            }
            num_seen += increment;
        }

        claim!(managers.is_empty());

        let admins = access.handle_view(RoleViewParams {
            role: Role::Admin,
            skip: 0,
            show: 10,
        });
        claim_eq!(admins, vec![Address::Account(ADMIN)]);
    }
}
