mod inmemory;

pub use inmemory::InMemoryRoomRepository;
