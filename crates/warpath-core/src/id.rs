use slotmap::new_key_type;

new_key_type! {
    /// Identifies a clan in the territory. Clans are never destroyed, so a
    /// `ClanId` stays valid for the whole simulation run.
    pub struct ClanId;
}
