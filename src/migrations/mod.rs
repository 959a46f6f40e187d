mod m0001_initial;
mod m0002_fk_not_null;

use cetane::prelude::MigrationRegistry;

pub fn registry() -> MigrationRegistry {
    let mut reg = MigrationRegistry::new();
    reg.register(m0001_initial::migration());
    reg.register(m0002_fk_not_null::migration());
    reg
}
