//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! BTreeMap をインメモリ DB として使用します（ID 順の一覧が自然に得られる）。

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Owner, RepositoryError, Room, RoomId, RoomName, RoomRepository};

#[derive(Default)]
struct Store {
    last_id: u64,
    rooms: BTreeMap<RoomId, Room>,
}

impl Store {
    fn has_name(&self, owner: &Owner, name: &RoomName, except: Option<RoomId>) -> bool {
        self.rooms
            .values()
            .any(|r| r.is_owned_by(owner) && &r.name == name && Some(r.id) != except)
    }

    fn owned_mut(&mut self, id: RoomId, owner: &Owner) -> Result<&mut Room, RepositoryError> {
        self.rooms
            .get_mut(&id)
            .filter(|r| r.is_owned_by(owner))
            .ok_or(RepositoryError::RoomNotFound(id))
    }
}

/// インメモリ Room Repository 実装
///
/// ID は 1 から順に採番し、削除後も再利用しない。
#[derive(Default)]
pub struct InMemoryRoomRepository {
    store: Mutex<Store>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, owner: Owner, name: RoomName) -> Result<Room, RepositoryError> {
        let mut store = self.store.lock().await;
        if store.has_name(&owner, &name, None) {
            return Err(RepositoryError::DuplicateRoomName(name.as_str().to_string()));
        }
        store.last_id += 1;
        let room = Room::new(RoomId::new(store.last_id), name, owner);
        store.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn list_by_owner(&self, owner: &Owner) -> Vec<Room> {
        let store = self.store.lock().await;
        store
            .rooms
            .values()
            .filter(|r| r.is_owned_by(owner))
            .cloned()
            .collect()
    }

    async fn find(&self, id: RoomId, owner: &Owner) -> Result<Room, RepositoryError> {
        let store = self.store.lock().await;
        store
            .rooms
            .get(&id)
            .filter(|r| r.is_owned_by(owner))
            .cloned()
            .ok_or(RepositoryError::RoomNotFound(id))
    }

    async fn rename(
        &self,
        id: RoomId,
        owner: &Owner,
        name: RoomName,
    ) -> Result<Room, RepositoryError> {
        let mut store = self.store.lock().await;
        store.owned_mut(id, owner)?;
        if store.has_name(owner, &name, Some(id)) {
            return Err(RepositoryError::DuplicateRoomName(name.as_str().to_string()));
        }
        let room = store.owned_mut(id, owner)?;
        room.rename(name);
        Ok(room.clone())
    }

    async fn delete(&self, id: RoomId, owner: &Owner) -> Result<(), RepositoryError> {
        let mut store = self.store.lock().await;
        store.owned_mut(id, owner)?;
        store.rooms.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRepository の CRUD 操作
    //
    // 【なぜこのテストが必要か】
    // - ID の採番規則と所有者ごとの名前の一意性は API の振る舞いそのもの
    // - 他人のルームが見えないことを保証する
    //
    // 【どのようなシナリオをテストするか】
    // 1. 作成時に ID が 1 から順に採番される
    // 2. 同じ所有者の同名ルームは作成できない（別の所有者なら可）
    // 3. 一覧・取得・改名・削除は所有者のルームのみが対象
    // ========================================

    fn name(value: &str) -> RoomName {
        RoomName::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        // テスト項目: 作成するたびに ID が 1 ずつ増える
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let alice = Owner::new("alice");

        // when (操作):
        let first = repo.create(alice.clone(), name("one")).await.unwrap();
        let second = repo.create(alice.clone(), name("two")).await.unwrap();

        // then (期待する結果):
        assert_eq!(first.id, RoomId::new(1));
        assert_eq!(second.id, RoomId::new(2));
        assert_eq!(second.owner, alice);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name_per_owner() {
        // テスト項目: 同じ所有者の同名ルームはエラー、別の所有者なら作成できる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        repo.create(Owner::new("alice"), name("lobby")).await.unwrap();

        // when (操作):
        let duplicate = repo.create(Owner::new("alice"), name("lobby")).await;
        let other_owner = repo.create(Owner::new("bob"), name("lobby")).await;

        // then (期待する結果):
        assert_eq!(
            duplicate,
            Err(RepositoryError::DuplicateRoomName("lobby".to_string()))
        );
        assert!(other_owner.is_ok());
    }

    #[tokio::test]
    async fn test_list_by_owner_filters_and_orders_by_id() {
        // テスト項目: 一覧は所有者のルームのみを ID 順で返す
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let alice = Owner::new("alice");
        repo.create(alice.clone(), name("a1")).await.unwrap();
        repo.create(Owner::new("bob"), name("b1")).await.unwrap();
        repo.create(alice.clone(), name("a2")).await.unwrap();

        // when (操作):
        let rooms = repo.list_by_owner(&alice).await;

        // then (期待する結果):
        let names: Vec<&str> = rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a1", "a2"]);
    }

    #[tokio::test]
    async fn test_rename_and_duplicate_check() {
        // テスト項目: 改名は成功し、既存の別ルームと同名への改名はエラー
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let alice = Owner::new("alice");
        let one = repo.create(alice.clone(), name("one")).await.unwrap();
        repo.create(alice.clone(), name("two")).await.unwrap();

        // when (操作):
        let renamed = repo.rename(one.id, &alice, name("uno")).await.unwrap();
        let same_name = repo.rename(one.id, &alice, name("uno")).await;
        let clash = repo.rename(one.id, &alice, name("two")).await;

        // then (期待する結果):
        assert_eq!(renamed.name, name("uno"));
        assert!(same_name.is_ok());
        assert_eq!(
            clash,
            Err(RepositoryError::DuplicateRoomName("two".to_string()))
        );
    }

    #[tokio::test]
    async fn test_other_owners_room_is_not_found() {
        // テスト項目: 他人のルームの取得・改名・削除は RoomNotFound
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let room = repo.create(Owner::new("alice"), name("private")).await.unwrap();
        let bob = Owner::new("bob");

        // when (操作) / then (期待する結果):
        let not_found = RepositoryError::RoomNotFound(room.id);
        assert_eq!(repo.find(room.id, &bob).await, Err(not_found.clone()));
        assert_eq!(
            repo.rename(room.id, &bob, name("mine")).await,
            Err(not_found.clone())
        );
        assert_eq!(repo.delete(room.id, &bob).await, Err(not_found));
        assert!(repo.find(room.id, &Owner::new("alice")).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_does_not_reuse_ids() {
        // テスト項目: 削除後に作成しても ID は再利用されない
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        let alice = Owner::new("alice");
        let first = repo.create(alice.clone(), name("one")).await.unwrap();

        // when (操作):
        repo.delete(first.id, &alice).await.unwrap();
        let second = repo.create(alice.clone(), name("one")).await.unwrap();

        // then (期待する結果):
        assert_eq!(second.id, RoomId::new(2));
        assert_eq!(repo.list_by_owner(&alice).await, vec![second]);
    }
}
