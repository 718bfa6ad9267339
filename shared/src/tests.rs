#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashMap};
    use time::macros::date;
    use crate::*;

    #[derive(Debug, Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        reject_writes: bool,
        writes: usize,
    }

    impl KeyValueStorage for FlakyStorage {
        fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
            self.writes += 1;
            if self.reject_writes {
                return Err(StorageError::WriteRejected("quota exceeded".into()));
            }
            self.inner.set(key, value)
        }
    }

    fn photo(id: &str, owner: &str, category: Category, votes: usize) -> Photo {
        Photo::submitted(PhotoSubmission {
            id: id.into(),
            title: format!("Photo {id}"),
            photographer: format!("Member {owner}"),
            photographer_id: owner.into(),
            description: String::new(),
            image_url: format!("https://example.org/{id}.jpg"),
            category,
            upload_date: date!(2024 - 03 - 01),
        })
        .with_voters((0..votes).map(|n| UserId::from(format!("voter-{id}-{n}"))))
    }

    fn catalog(photos: Vec<Photo>) -> PhotoCatalog {
        PhotoCatalog::new(photos).unwrap()
    }

    fn aggregator(photos: Vec<Photo>) -> VoteAggregator<MemoryStorage> {
        VoteAggregator::new(catalog(photos), VoteStore::new(MemoryStorage::new()))
    }

    fn user(id: &str) -> UserId { UserId::from(id) }
    fn pid(id: &str) -> PhotoId { PhotoId::from(id) }

    fn ids(ranked: &[RankedPhoto<'_>]) -> Vec<String> {
        ranked.iter().map(|r| r.photo.id.to_string()).collect()
    }

    fn assert_consistent(agg: &VoteAggregator<MemoryStorage>, users: &[&str]) {
        for p in agg.catalog().iter() {
            assert!(p.is_consistent(), "photo {} has votes {} but {} voters", p.id, p.votes(), p.voters().len());
        }
        for u in users {
            let u = user(u);
            let votes = agg.votes_of(&u);
            for p in agg.catalog().iter() {
                assert_eq!(votes.contains(&p.id), p.has_voter(&u), "user {} / photo {}", u, p.id);
            }
        }
    }

    #[test]
    fn test_cast_vote_on_fresh_photo() {
        let mut agg = aggregator(vec![photo("p", "owner", Category::Lunar, 10)]);
        let alice = user("alice");

        let result = agg.toggle_vote(Some(&alice), &pid("p")).unwrap();
        assert_eq!(result.action, VoteAction::Cast);
        assert_eq!(result.votes, 11);
        assert!(result.persistence_warning.is_none());

        let p = agg.catalog().get(&pid("p")).unwrap();
        assert_eq!(p.votes(), 11);
        assert!(p.has_voter(&alice));
        assert_eq!(agg.votes_of(&alice), BTreeSet::from([pid("p")]));
    }

    #[test]
    fn test_cast_on_empty_voter_list() {
        let mut agg = aggregator(vec![photo("p", "owner", Category::Lunar, 0)]);
        let result = agg.toggle_vote(Some(&user("u1")), &pid("p")).unwrap();
        assert_eq!(result.votes, 1);
        assert_eq!(agg.catalog().get(&pid("p")).unwrap().voters(), &[user("u1")]);
    }

    #[test]
    fn test_toggle_twice_restores_catalog() {
        let mut agg = aggregator(PhotoCatalog::seeded().unwrap().into_iter().collect());
        let before = agg.catalog().clone();
        let u = user("42");

        assert_eq!(agg.toggle_vote(Some(&u), &pid("3")).unwrap().action, VoteAction::Cast);
        assert_eq!(agg.toggle_vote(Some(&u), &pid("3")).unwrap().action, VoteAction::Retracted);

        assert_eq!(agg.catalog(), &before);
        assert!(agg.votes_of(&u).is_empty());
    }

    #[test]
    fn test_retract_seeded_vote() {
        let mut agg = aggregator(PhotoCatalog::seeded().unwrap().into_iter().collect());
        let member = user("1");
        assert!(agg.has_voted(&member, &pid("1")));

        let result = agg.toggle_vote(Some(&member), &pid("1")).unwrap();
        assert_eq!(result.action, VoteAction::Retracted);
        assert_eq!(result.votes, 23);
        assert!(!agg.catalog().get(&pid("1")).unwrap().has_voter(&member));
        assert_consistent(&agg, &["1"]);
    }

    #[test]
    fn test_self_vote_rejected() {
        let mut agg = aggregator(vec![photo("mine", "sarah", Category::DeepSpace, 5)]);
        let sarah = user("sarah");

        assert_eq!(
            agg.toggle_vote(Some(&sarah), &pid("mine")),
            Err(VoteError::SelfVoteRejected(pid("mine")))
        );
        let p = agg.catalog().get(&pid("mine")).unwrap();
        assert_eq!(p.votes(), 5);
        assert!(!p.has_voter(&sarah));
        assert!(agg.votes_of(&sarah).is_empty());
        assert_eq!(agg.store().storage().raw(&VoteStore::<MemoryStorage>::key(&sarah)), None);
    }

    #[test]
    fn test_refused_operations() {
        let mut agg = aggregator(vec![photo("p", "owner", Category::Planetary, 3)]);
        let before = agg.catalog().clone();

        assert_eq!(agg.toggle_vote(None, &pid("p")), Err(VoteError::NotAuthenticated));
        assert_eq!(
            agg.toggle_vote(Some(&user("u")), &pid("missing")),
            Err(VoteError::UnknownPhoto(pid("missing")))
        );
        assert_eq!(agg.catalog(), &before);
        assert!(matches!(agg.can_vote(None, &pid("p")), Err(VoteError::NotAuthenticated)));
        assert!(agg.can_vote(Some(&user("u")), &pid("p")).is_ok());
    }

    #[test]
    fn test_invariants_hold_across_many_users() {
        let mut agg = aggregator(vec![
            photo("a", "o1", Category::DeepSpace, 2),
            photo("b", "o2", Category::Planetary, 0),
            photo("c", "o3", Category::Lunar, 7),
        ]);
        let users = ["u1", "u2", "u3", "o1"];
        let script = [
            ("u1", "a"), ("u2", "a"), ("u1", "b"), ("u3", "c"), ("u1", "a"),
            ("o1", "b"), ("o1", "a"), ("u2", "c"), ("u2", "c"), ("u3", "b"),
        ];
        for (u, p) in script {
            let _ = agg.toggle_vote(Some(&user(u)), &pid(p));
            assert_consistent(&agg, &users);
        }
        assert_eq!(agg.catalog().get(&pid("a")).unwrap().votes(), 3);
        assert_eq!(agg.catalog().get(&pid("b")).unwrap().votes(), 3);
        assert_eq!(agg.catalog().get(&pid("c")).unwrap().votes(), 8);
    }

    #[test]
    fn test_votes_persist_and_reload() {
        let photos = vec![
            photo("a", "o1", Category::DeepSpace, 4),
            photo("b", "o2", Category::Planetary, 1),
        ];
        let mut agg = aggregator(photos.clone());
        let u = user("u");
        agg.toggle_vote(Some(&u), &pid("b")).unwrap();

        let raw = agg.store().storage().raw("votes_u").unwrap().to_string();
        assert_eq!(serde_json::from_str::<VoteRecord>(&raw).unwrap().photo_ids, BTreeSet::from([pid("b")]));

        // A fresh catalog on reload gets the stored vote re-applied.
        let storage = agg.into_store().into_storage();
        let mut reloaded = VoteAggregator::new(catalog(photos), VoteStore::new(storage));
        reloaded.load_user(&u);
        assert_eq!(reloaded.catalog().get(&pid("b")).unwrap().votes(), 2);
        assert!(reloaded.has_voted(&u, &pid("b")));
        assert_eq!(reloaded.votes_of(&u), BTreeSet::from([pid("b")]));
    }

    #[test]
    fn test_stored_record_overrides_seed_voters() {
        let mut storage = MemoryStorage::new();
        storage.set("votes_1", r#"{"photoIds":["2"]}"#).unwrap();
        let mut agg = VoteAggregator::new(PhotoCatalog::seeded().unwrap(), VoteStore::new(storage));
        let member = user("1");
        agg.load_user(&member);

        assert_eq!(agg.votes_of(&member), BTreeSet::from([pid("2")]));
        assert_eq!(agg.catalog().get(&pid("1")).unwrap().votes(), 23);
        assert_eq!(agg.catalog().get(&pid("2")).unwrap().votes(), 18);
        assert_consistent(&agg, &["1"]);
    }

    #[test]
    fn test_stored_votes_for_unknown_or_own_photos_are_dropped() {
        let mut storage = MemoryStorage::new();
        storage.set("votes_o1", r#"["a","b","gone"]"#).unwrap();
        let mut agg = VoteAggregator::new(
            catalog(vec![photo("a", "o1", Category::Lunar, 0), photo("b", "o2", Category::Lunar, 0)]),
            VoteStore::new(storage),
        );
        agg.load_user(&user("o1"));
        assert_eq!(agg.votes_of(&user("o1")), BTreeSet::from([pid("b")]));
        assert_eq!(agg.catalog().get(&pid("a")).unwrap().votes(), 0);
    }

    #[test]
    fn test_malformed_record_loads_as_empty() {
        let store_with = |raw: &str| {
            let mut storage = MemoryStorage::new();
            storage.set("votes_u", raw).unwrap();
            VoteStore::new(storage)
        };
        assert!(store_with("not json").load(&user("u")).is_empty());
        assert!(store_with(r#"{"photoIds": 7}"#).load(&user("u")).is_empty());
        assert!(store_with("null").load(&user("u")).is_empty());
        assert_eq!(store_with("[]").load_record(&user("u")), Some(BTreeSet::new()));
        assert_eq!(store_with(r#"["1","1","2"]"#).load(&user("u")), BTreeSet::from([pid("1"), pid("2")]));
        assert_eq!(VoteStore::new(MemoryStorage::new()).load_record(&user("u")), None);
    }

    #[test]
    fn test_write_failure_keeps_vote_and_retries() {
        let storage = FlakyStorage { reject_writes: true, ..Default::default() };
        let mut agg = VoteAggregator::new(
            catalog(vec![photo("a", "o", Category::WideField, 1), photo("b", "o", Category::WideField, 0)]),
            VoteStore::new(storage),
        );
        let u = user("u");

        let result = agg.toggle_vote(Some(&u), &pid("a")).unwrap();
        assert_eq!(result.votes, 2);
        assert!(matches!(result.persistence_warning, Some(StorageError::WriteRejected(_))));
        assert!(agg.has_unsaved_votes(&u));
        assert!(agg.has_voted(&u, &pid("a")));

        assert!(matches!(agg.retry_persist(&u), Err(VoteError::PersistenceWriteFailure(_))));

        agg.store_mut().storage_mut().reject_writes = false;
        agg.toggle_vote(Some(&u), &pid("b")).unwrap();
        assert!(!agg.has_unsaved_votes(&u));
        assert_eq!(agg.store().load(&u), BTreeSet::from([pid("a"), pid("b")]));

        let writes = agg.store().storage().writes;
        agg.retry_persist(&u).unwrap();
        assert_eq!(agg.store().storage().writes, writes);
    }

    #[test]
    fn test_rank_orders_by_votes() {
        let photos = vec![
            photo("A", "x", Category::DeepSpace, 24),
            photo("B", "x", Category::DeepSpace, 18),
            photo("C", "x", Category::DeepSpace, 32),
        ];
        assert_eq!(ids(&rank(&photos)), ["C", "B", "A"]);
    }

    #[test]
    fn test_rank_ties_keep_insertion_order() {
        let photos = vec![
            photo("A", "x", Category::DeepSpace, 20),
            photo("B", "x", Category::DeepSpace, 20),
        ];
        assert_eq!(ids(&rank(&photos)), ["A", "B"]);

        let many: Vec<_> = (0..20).map(|i| photo(&format!("t{i:02}"), "x", Category::Lunar, (i % 3) as usize)).collect();
        let ranked = rank(&many);
        for w in ranked.windows(2) {
            let (a, b) = (w[0].photo, w[1].photo);
            assert!(a.votes() > b.votes() || (a.votes() == b.votes() && a.id < b.id));
        }
    }

    #[test]
    fn test_seeded_leaderboard() {
        let catalog = PhotoCatalog::seeded().unwrap();
        let votes: Vec<_> = catalog.iter().map(Photo::votes).collect();
        assert_eq!(votes, [24, 18, 32, 28, 21, 35]);

        let top = leaderboard(catalog.photos(), LEADERBOARD_SIZE);
        assert_eq!(top.iter().map(|r| r.photo.votes()).collect::<Vec<_>>(), [35, 32, 28]);
        assert_eq!(
            top.iter().map(|r| r.badge).collect::<Vec<_>>(),
            [Some(RankBadge::Gold), Some(RankBadge::Silver), Some(RankBadge::Bronze)]
        );
        assert_eq!(rank(catalog.photos())[3].badge, None);
        assert_eq!(RankBadge::Silver.label(), "2nd");
    }

    #[test]
    fn test_ranking_follows_votes() {
        let mut agg = aggregator(vec![
            photo("a", "o", Category::Lunar, 1),
            photo("b", "o", Category::Lunar, 1),
        ]);
        assert_eq!(ids(&rank(agg.catalog().photos())), ["a", "b"]);
        agg.toggle_vote(Some(&user("u")), &pid("b")).unwrap();
        assert_eq!(ids(&rank(agg.catalog().photos())), ["b", "a"]);
        agg.toggle_vote(Some(&user("u")), &pid("b")).unwrap();
        assert_eq!(ids(&rank(agg.catalog().photos())), ["a", "b"]);
    }

    #[test]
    fn test_filter_preserves_global_rank() {
        let catalog = PhotoCatalog::seeded().unwrap();
        let deep_space: CategoryFilter = "Deep Space".parse().unwrap();
        let ranked = rank(catalog.photos());
        let expected: Vec<_> = ranked.iter()
            .filter(|r| r.photo.category == Category::DeepSpace)
            .map(|r| (r.photo.id.to_string(), r.position))
            .collect();

        let visible = filter(rank(catalog.photos()), &deep_space);
        let got: Vec<_> = visible.iter().map(|r| (r.photo.id.to_string(), r.position)).collect();
        assert_eq!(got, expected);
        assert_eq!(got, [("4".to_string(), 3), ("1".to_string(), 4)]);

        assert_eq!(filter(rank(catalog.photos()), &CategoryFilter::All).len(), catalog.len());
    }

    #[test]
    fn test_category_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!("Lunar".parse::<CategoryFilter>().unwrap(), CategoryFilter::Only(Category::Lunar));
        assert!(matches!("deep space".parse::<CategoryFilter>(), Err(ValidationError::UnknownCategory(_))));
        assert_eq!(CategoryFilter::options().count(), 5);
        assert_eq!(CategoryFilter::Only(Category::WideField).to_string(), "Wide Field");

        let catalog = PhotoCatalog::seeded().unwrap();
        let planetary = filter_photos(catalog.photos(), &CategoryFilter::Only(Category::Planetary));
        assert_eq!(planetary.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), ["2", "5"]);
    }

    #[test]
    fn test_catalog_validation() {
        let dup = PhotoCatalog::new(vec![
            photo("a", "o", Category::Lunar, 0),
            photo("a", "o", Category::Lunar, 0),
        ]);
        assert_eq!(dup, Err(CatalogError::DuplicatePhoto(pid("a"))));

        let inconsistent: Photo = serde_json::from_value(serde_json::json!({
            "id": "x", "title": "X", "photographer": "P", "photographerId": "p",
            "description": "", "imageUrl": "", "category": "Lunar",
            "uploadDate": "2024-03-08", "votes": 3, "voters": ["a"]
        })).unwrap();
        assert_eq!(PhotoCatalog::new(vec![inconsistent]), Err(CatalogError::InconsistentVotes(pid("x"))));

        let self_voted = photo("s", "o", Category::Lunar, 2).with_voters([user("o")]);
        assert_eq!(PhotoCatalog::new(vec![self_voted]), Err(CatalogError::SelfVote(pid("s"))));

        let mut untitled = photo("t", "o", Category::Lunar, 0);
        untitled.title = "  ".into();
        assert!(matches!(PhotoCatalog::new(vec![untitled]), Err(CatalogError::InvalidPhoto(_, ValidationError::EmptyTitle))));
    }

    #[test]
    fn test_with_voters_dedups() {
        let p = photo("a", "o", Category::Lunar, 0).with_voters(["u", "v", "u"].map(UserId::from));
        assert_eq!(p.votes(), 2);
        assert!(p.is_consistent());
    }

    #[test]
    fn test_photo_json_shape() {
        let catalog = PhotoCatalog::seeded().unwrap();
        let value = serde_json::to_value(catalog.get(&pid("6")).unwrap()).unwrap();
        assert_eq!(value["photographerId"], "9");
        assert_eq!(value["category"], "Lunar");
        assert_eq!(value["uploadDate"], "2024-03-08");
        assert_eq!(value["votes"], 35);
        assert_eq!(value["voters"].as_array().unwrap().len(), 35);

        let back: Photo = serde_json::from_value(value).unwrap();
        assert_eq!(&back, catalog.get(&pid("6")).unwrap());
    }

    #[test]
    fn test_session_requires_user() {
        let result = ContestSession::sign_in(None, PhotoCatalog::seeded().unwrap(), MemoryStorage::new());
        assert!(matches!(result, Err(VoteError::NotAuthenticated)));
    }

    #[test]
    fn test_session_activity_and_views() {
        let sarah = CurrentUser { id: "2".into(), name: "Sarah Chen".into(), email: "sarah@example.com".into(), is_admin: false };
        let mut session = ContestSession::sign_in(Some(sarah), PhotoCatalog::seeded().unwrap(), MemoryStorage::new()).unwrap();

        // Seed lists "2" as a voter on photos 2, 3, 4 and 6.
        assert_eq!(session.activity(), VotingActivity { photos_voted: 4, submissions: 1, votes_received: 24 });
        assert!(session.is_own_photo(session.aggregator().catalog().get(&pid("1")).unwrap()));
        assert!(matches!(session.toggle_vote(&pid("1")), Err(VoteError::SelfVoteRejected(_))));
        assert!(session.can_vote(&pid("5")).is_ok());

        let result = session.toggle_vote(&pid("5")).unwrap();
        assert_eq!((result.action, result.votes), (VoteAction::Cast, 22));
        assert!(session.has_voted(&pid("5")));
        assert_eq!(session.activity().photos_voted, 5);

        let lunar = session.visible(&CategoryFilter::Only(Category::Lunar));
        assert_eq!(ids(&lunar), ["6"]);
        assert_eq!(lunar[0].position, 1);
        assert_eq!(session.leaderboard(&CategoryFilter::All).len(), LEADERBOARD_SIZE);
        assert!(!session.has_unsaved_votes());
        assert!(session.retry_persist().is_ok());

        let storage = session.sign_out();
        let saved = VoteStore::new(storage).load(&user("2"));
        assert_eq!(saved.len(), 5);
        assert!(saved.contains(&pid("5")));
    }

    #[test]
    fn test_leaderboard_follows_category() {
        let sarah = CurrentUser { id: "2".into(), name: "Sarah Chen".into(), email: "sarah@example.com".into(), is_admin: false };
        let session = ContestSession::sign_in(Some(sarah), PhotoCatalog::seeded().unwrap(), MemoryStorage::new()).unwrap();

        let all = session.leaderboard(&CategoryFilter::All);
        assert_eq!(ids(&all), ["6", "3", "4"]);

        let planetary = session.leaderboard(&CategoryFilter::Only(Category::Planetary));
        assert!(planetary.iter().all(|r| r.photo.category == Category::Planetary));
        assert_eq!(
            planetary.iter().map(|r| (r.photo.id.to_string(), r.position, r.badge)).collect::<Vec<_>>(),
            [("5".to_string(), 5, None), ("2".to_string(), 6, None)]
        );

        let deep_space = session.leaderboard(&CategoryFilter::Only(Category::DeepSpace));
        assert_eq!(deep_space[0].badge, Some(RankBadge::Bronze));
        assert_eq!(deep_space.len(), 2);
    }

    #[test]
    fn test_submission_stats() {
        let agg = aggregator(vec![
            photo("a", "me", Category::Lunar, 3),
            photo("b", "me", Category::Planetary, 4),
            photo("c", "other", Category::Planetary, 9),
        ]);
        assert_eq!(agg.submission_stats(&user("me")), SubmissionStats { submissions: 2, votes_received: 7 });
        assert_eq!(agg.submission_stats(&user("nobody")), SubmissionStats::default());
    }

    #[test]
    fn test_member_request_validation() {
        let request = |name: &str, email: &str, password: &str| CreateMemberRequest {
            name: name.into(), email: email.into(), password: password.into(),
        };
        assert!(validate_member_request(&request("Ada", "ada@example.com", "password123")).is_ok());
        assert_eq!(
            validate_member_request(&request("", "", "pw")),
            Err(ValidationError::MissingFields("name, email".into()))
        );
        assert_eq!(validate_member_request(&request("Ada", "ada.example.com", "password123")), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_member_request(&request("Ada", "ada@localhost", "password123")), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_member_request(&request("Ada", "ada@example.com", "short")), Err(ValidationError::PasswordTooShort));
        assert_eq!(validate_member_request(&request(&"n".repeat(61), "ada@example.com", "password123")), Err(ValidationError::NameTooLong));
    }

    #[test]
    fn test_vote_error_codes() {
        let codes: HashMap<_, _> = [
            ("auth", VoteError::NotAuthenticated),
            ("unknown", VoteError::UnknownPhoto(pid("x"))),
            ("self", VoteError::SelfVoteRejected(pid("x"))),
        ]
        .into_iter()
        .map(|(k, e)| (k, Error::from(e).code))
        .collect();
        assert_eq!(codes["auth"], ErrorCode::Unauthorized);
        assert_eq!(codes["unknown"], ErrorCode::NotFound);
        assert_eq!(codes["self"], ErrorCode::Forbidden);
    }

    #[test]
    fn test_request_fingerprint_is_stable() {
        let a = request_fingerprint("10.0.0.1", Some("Firefox"));
        assert_eq!(a, request_fingerprint("10.0.0.1", Some("Firefox")));
        assert_ne!(a, request_fingerprint("10.0.0.1", None));
        assert_ne!(a, request_fingerprint("10.0.0.2", Some("Firefox")));
    }
}
